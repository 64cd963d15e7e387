//! Session-specific error types.

use thiserror::Error;

use super::Stage;
use crate::domain::foundation::{ErrorCode, ValidationError};

/// Errors returned by session operations. All of them are recoverable and
/// leave the session unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Caller input was rejected.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Operation is not available in the current stage.
    #[error("Cannot {operation} while session is in stage '{stage}'")]
    InvalidState {
        stage: Stage,
        operation: &'static str,
    },

    /// Quiz submitted before every question was answered.
    #[error("Answered {answered} of {total} questions; all must be answered before submitting")]
    IncompleteAnswers { answered: usize, total: usize },

    /// A generation request is already in flight for this session.
    #[error("A generation request is already in progress (stage '{stage}')")]
    RequestInProgress { stage: Stage },
}

impl SessionError {
    pub fn invalid_state(stage: Stage, operation: &'static str) -> Self {
        SessionError::InvalidState { stage, operation }
    }

    pub fn incomplete(answered: usize, total: usize) -> Self {
        SessionError::IncompleteAnswers { answered, total }
    }

    pub fn in_progress(stage: Stage) -> Self {
        SessionError::RequestInProgress { stage }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Validation(_) => ErrorCode::ValidationFailed,
            SessionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SessionError::IncompleteAnswers { .. } => ErrorCode::IncompleteAnswers,
            SessionError::RequestInProgress { .. } => ErrorCode::RequestInProgress,
        }
    }
}
