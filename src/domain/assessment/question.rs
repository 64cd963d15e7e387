//! Quiz questions and the quiz value object.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::foundation::{QuestionId, ValidationError};

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Zero-based index of a chosen or correct option, always in `0..OPTION_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// Creates an option index, rejecting anything outside `0..=3`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (value as usize) < OPTION_COUNT {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "option_index",
                0,
                OPTION_COUNT as i64 - 1,
                value as i64,
            ))
        }
    }

    /// Returns the raw index.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the index as a `usize` for slice access.
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for OptionIndex {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionIndex> for u8 {
    fn from(index: OptionIndex) -> Self {
        index.0
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single multiple-choice question.
///
/// # Invariants
///
/// - `text` and `concept_tag` are non-empty
/// - exactly four non-empty options
/// - `correct_option` is one of those four
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    text: String,
    options: [String; OPTION_COUNT],
    correct_option: OptionIndex,
    concept_tag: String,
}

impl Question {
    /// Creates a validated question. Text fields are trimmed.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_option: OptionIndex,
        concept_tag: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = non_empty("question", text.into())?;
        let concept_tag = non_empty("concept_tag", concept_tag.into())?;

        let [a, b, c, d] = options;
        let options = [
            non_empty("options", a)?,
            non_empty("options", b)?,
            non_empty("options", c)?,
            non_empty("options", d)?,
        ];

        Ok(Self {
            id,
            text,
            options,
            correct_option,
            concept_tag,
        })
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct_option(&self) -> OptionIndex {
        self.correct_option
    }

    pub fn concept_tag(&self) -> &str {
        &self.concept_tag
    }

    /// Returns true if `choice` is the correct option.
    pub fn is_correct(&self, choice: OptionIndex) -> bool {
        self.correct_option == choice
    }
}

fn non_empty(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::empty_field(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// An ordered, non-empty set of questions generated for one topic.
///
/// Never mutated after construction; a restart produces a new quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    /// Creates a quiz, rejecting an empty list or duplicate question ids.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("questions"));
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(ValidationError::invalid_format(
                    "questions",
                    format!("duplicate question id {}", question.id()),
                ));
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed quiz; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Looks up a question by id.
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.question(id).is_some()
    }

    /// Question ids in quiz order.
    pub fn ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(Question::id)
    }
}

impl TryFrom<Vec<Question>> for Quiz {
    type Error = ValidationError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<Quiz> for Vec<Question> {
    fn from(quiz: Quiz) -> Self {
        quiz.questions
    }
}
