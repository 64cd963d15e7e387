//! Generation domain module.
//!
//! Everything needed to turn the raw text of a generation backend into
//! validated quizzes and roadmap steps. Parsing never panics; every
//! failure comes back as a [`ParseError`].

mod errors;
mod extractor;
mod parser;

pub use errors::ParseError;
pub use extractor::extract_array;
pub use parser::{parse_quiz, parse_roadmap};
