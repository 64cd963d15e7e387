//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and the error
//! vocabulary used by every other domain module.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{QuestionId, SessionId};
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;
