//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `assessment` - Questions, quizzes, answers and scoring
//! - `roadmap` - Week-by-week learning plans
//! - `generation` - Parsing of generated quiz and roadmap payloads
//! - `session` - The assessment session aggregate and its workflow stages
//! - `export` - Plain-text report of a finished session

pub mod assessment;
pub mod export;
pub mod foundation;
pub mod generation;
pub mod roadmap;
pub mod session;
