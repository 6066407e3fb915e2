use thiserror::Error;

use std::io;

/// Failure converting a raw value into a field's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Invalid int")]
    Int,

    #[error("Invalid uint")]
    Uint,

    #[error("Invalid float")]
    Float,

    #[error("Can't set value of type {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The record description itself is unusable (duplicate or empty keys).
    #[error("mapping error at {key:?}: {message}")]
    Mapping { key: String, message: String },

    #[error("line {line}: {source} ({text:?})")]
    Value {
        line: usize,
        text: String,
        #[source]
        source: ValueError,
    },
}

impl Error {
    pub(crate) fn mapping(key: &str, message: impl Into<String>) -> Self {
        Error::Mapping {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// Line number (1-based) of a value error.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Value { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Classification of a value error, e.g. `Invalid int`.
    pub fn value_error(&self) -> Option<&ValueError> {
        match self {
            Error::Value { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
