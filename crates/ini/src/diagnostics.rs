//! Per-decode diagnostics: unmatched lines and the first hard error.

use crate::decode::scanner::ParsedLine;
use crate::error::{Error, Result};

/// A line that matched no binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmatched {
    /// 1-based line number
    pub line: usize,
    /// Line text as it appeared in the input
    pub text: String,
}

/// Result of one decode call.
///
/// Unmatched lines are informational and are reported whether or not the
/// decode failed.
#[derive(Debug, Default)]
pub struct Outcome {
    pub unmatched: Vec<Unmatched>,
    pub error: Option<Error>,
}

impl Outcome {
    pub(crate) fn failed(error: Error) -> Self {
        Self {
            unmatched: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Unmatched lines on success, the first error otherwise.
    pub fn into_result(self) -> Result<Vec<Unmatched>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.unmatched),
        }
    }

    pub(crate) fn unmatched(&mut self, line: &ParsedLine<'_>) {
        self.unmatched.push(Unmatched {
            line: line.number,
            text: line.raw.to_string(),
        });
    }

    /// Keeps only the first error.
    pub(crate) fn error(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        } else {
            tracing::trace!(%error, "dropping subsequent decode error");
        }
    }
}
