//! Resolution engine: walks scanned lines in order, tracking the active
//! section and writing matched values into their slots.

use tracing::{debug, trace};

use crate::decode::scanner::{self, LineKind, ParsedLine};
use crate::diagnostics::Outcome;
use crate::error::Error;
use crate::options::{Options, UnknownSection};
use crate::schema::{Bindings, Slot};

/// Active namespace at a scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Active {
    NoSection,
    InSection(usize),
}

/// State threaded through every line of one decode call.
pub(crate) struct ScanState {
    pub active: Active,
    pub outcome: Outcome,
}

impl ScanState {
    pub(crate) fn new() -> Self {
        Self {
            active: Active::NoSection,
            outcome: Outcome::default(),
        }
    }
}

pub(crate) fn run(input: &str, bindings: &mut Bindings<'_>, options: &Options) -> Outcome {
    let mut state = ScanState::new();
    for line in scanner::iter(input) {
        step(&mut state, &line, bindings, options);
        if options.stop_on_error && state.outcome.error.is_some() {
            debug!(line = line.number, "stopping at first decode error");
            break;
        }
    }
    state.outcome
}

pub(crate) fn step(
    state: &mut ScanState,
    line: &ParsedLine<'_>,
    bindings: &mut Bindings<'_>,
    options: &Options,
) {
    match line.kind {
        LineKind::Blank | LineKind::Comment => {}
        LineKind::Section(header) => {
            let tag = header.to_lowercase();
            match bindings.section(&tag) {
                Some(idx) => {
                    debug!(line = line.number, section = %bindings.sections[idx].tag, "entering section");
                    state.active = Active::InSection(idx);
                }
                None => {
                    debug!(line = line.number, section = %tag, "unknown section");
                    if options.unknown_sections == UnknownSection::Record {
                        state.outcome.unmatched(line);
                    }
                    state.active = Active::NoSection;
                }
            }
        }
        LineKind::KeyValue { key, value } => {
            let key = key.to_lowercase();
            if let Active::InSection(idx) = state.active {
                if let Some(slot) = bindings.sections[idx].fields.get_mut(&key) {
                    assign(&mut state.outcome, line, slot, value);
                    return;
                }
            }
            match bindings.top.get_mut(&key) {
                Some(slot) => {
                    assign(&mut state.outcome, line, slot, value);
                    if state.active != Active::NoSection {
                        debug!(line = line.number, key = %key, "top-level key closes section");
                    }
                    state.active = Active::NoSection;
                }
                None => state.outcome.unmatched(line),
            }
        }
        LineKind::Other(text) => {
            if options.bare_section_headers {
                let name = text.to_lowercase();
                let found = bindings
                    .bare_section(&name)
                    .or_else(|| bindings.section(&name));
                if let Some(idx) = found {
                    debug!(line = line.number, section = %bindings.sections[idx].tag, "entering section");
                    state.active = Active::InSection(idx);
                    return;
                }
            }
            state.outcome.unmatched(line);
        }
    }
}

fn assign(outcome: &mut Outcome, line: &ParsedLine<'_>, slot: &mut dyn Slot, value: &str) {
    match slot.set(value) {
        Ok(()) => trace!(line = line.number, kind = %slot.kind(), "value set"),
        Err(source) => outcome.error(Error::Value {
            line: line.number,
            text: line.raw.to_string(),
            source,
        }),
    }
}
