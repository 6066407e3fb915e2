#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod decode;
pub mod diagnostics;
pub mod schema;
pub mod value;

mod number;

pub use crate::diagnostics::{Outcome, Unmatched};
pub use crate::error::{Error, Result, ValueError};
pub use crate::options::{Options, UnknownSection};
pub use crate::schema::{Binder, Kind, Schema, Slot};

#[cfg(feature = "serde")]
pub use crate::schema::dynamic::{DynamicRecord, FieldDesc, SchemaDesc};

use std::io::Read;

/// Decode `data` into `record`, collecting unmatched lines and the first error.
pub fn decode<S: Schema + ?Sized>(data: &[u8], record: &mut S) -> Outcome {
    decode_with_options(data, record, &Options::default())
}

pub fn decode_with_options<S: Schema + ?Sized>(
    data: &[u8],
    record: &mut S,
    options: &Options,
) -> Outcome {
    let mut bindings = match crate::schema::bind(record) {
        Ok(b) => b,
        Err(e) => return Outcome::failed(e),
    };
    let text = String::from_utf8_lossy(data);
    crate::decode::engine::run(&text, &mut bindings, options)
}

/// Decode `data` into `record`, discarding unmatched lines.
pub fn from_slice<S: Schema + ?Sized>(data: &[u8], record: &mut S) -> Result<()> {
    decode(data, record).into_result().map(|_| ())
}

pub fn from_str<S: Schema + ?Sized>(s: &str, record: &mut S) -> Result<()> {
    from_slice(s.as_bytes(), record)
}

/// Decoder over a reader. The reader is drained in full by the first call to
/// [`Decoder::decode`]; later calls decode the same buffered input.
pub struct Decoder<R> {
    reader: Option<R>,
    data: Vec<u8>,
    /// Set when draining the reader failed; the buffered input is unusable
    read_error: Option<(std::io::ErrorKind, String)>,
    options: Options,
    unmatched: Vec<Unmatched>,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Options::default())
    }

    pub fn with_options(reader: R, options: Options) -> Self {
        Self {
            reader: Some(reader),
            data: Vec::new(),
            read_error: None,
            options,
            unmatched: Vec::new(),
        }
    }

    pub fn decode<S: Schema + ?Sized>(&mut self, record: &mut S) -> Result<()> {
        self.unmatched.clear();
        if let Some(mut reader) = self.reader.take() {
            if let Err(e) = reader.read_to_end(&mut self.data) {
                self.data.clear();
                self.read_error = Some((e.kind(), e.to_string()));
                return Err(e.into());
            }
        }
        if let Some((kind, message)) = &self.read_error {
            return Err(std::io::Error::new(*kind, message.clone()).into());
        }
        let Outcome { unmatched, error } = decode_with_options(&self.data, record, &self.options);
        self.unmatched = unmatched;
        match error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Lines the last [`Decoder::decode`] call could not match, in file order.
    pub fn unmatched_lines(&self) -> &[Unmatched] {
        &self.unmatched
    }
}
