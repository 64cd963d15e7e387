//! Errors raised while turning generated text into domain values.

use thiserror::Error;

/// The generated text could not be turned into a quiz or roadmap.
///
/// Distinct from transport failures: the backend answered, but the answer
/// was unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no bracketed JSON array found in generated text")]
    NoArrayFound,

    #[error("bracketed region is not valid JSON: {0}")]
    Malformed(String),

    #[error("generated array is empty")]
    Empty,

    #[error("entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

impl ParseError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ParseError::Malformed(reason.into())
    }

    pub fn invalid_entry(index: usize, reason: impl Into<String>) -> Self {
        ParseError::InvalidEntry {
            index,
            reason: reason.into(),
        }
    }
}
