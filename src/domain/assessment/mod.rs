//! Assessment domain module.
//!
//! Questions, quizzes, recorded answers and the pure scoring rules that
//! turn them into a score, a proficiency level and a set of weak concepts.

mod answers;
pub(crate) mod question;
mod scoring;
mod topics;

pub use answers::AnswerMap;
pub use question::{OptionIndex, Question, Quiz, OPTION_COUNT};
pub use scoring::{ProficiencyLevel, ScoreResult, ScoringEngine};
pub use topics::PRESET_TOPICS;
