/// What to do with a `[header]` that names no declared section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownSection {
    /// Report the header line as unmatched
    #[default]
    Record,
    /// Drop the header silently
    Ignore,
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Handling of unknown section headers. The active section is reset
    /// to none in both modes.
    pub unknown_sections: UnknownSection,
    /// Accept a line equal to a section name (brackets optional) as a header
    pub bare_section_headers: bool,
    /// Stop scanning at the first value error
    pub stop_on_error: bool,
}
