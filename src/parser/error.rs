//! Parse errors
//!
//! [`FieldError`] is what a line builder reports; the driver attaches the
//! line index and turns it into a [`ParseError`].

use thiserror::Error;

/// A required numeric field on a single line could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("line number field '{0}' is not an integer")]
    InvalidLineNumber(String),
    #[error("code number field '{0}' is not an integer")]
    InvalidCodeNumber(String),
}

/// Fatal error that aborts a parse
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read program input")]
    Io(#[from] std::io::Error),
    #[error("malformed line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: FieldError,
    },
}

impl ParseError {
    /// Index of the offending line, when the error is tied to one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io(_) => None,
            ParseError::Malformed { line, .. } => Some(*line),
        }
    }
}
