//! The user's answers to the active quiz.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{OptionIndex, Quiz};
use crate::domain::foundation::QuestionId;

/// Chosen option per question id.
///
/// Only grows while a quiz is active: re-answering a question replaces the
/// earlier choice but never removes the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<QuestionId, OptionIndex>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the answer for `question_id`.
    ///
    /// Returns the previously chosen option, if any.
    pub fn record(&mut self, question_id: QuestionId, choice: OptionIndex) -> Option<OptionIndex> {
        self.0.insert(question_id, choice)
    }

    pub fn get(&self, question_id: QuestionId) -> Option<OptionIndex> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of quiz questions that have an answer.
    pub fn answered_in(&self, quiz: &Quiz) -> usize {
        quiz.ids().filter(|id| self.0.contains_key(id)).count()
    }

    /// True when every question of `quiz` has an answer.
    pub fn covers(&self, quiz: &Quiz) -> bool {
        self.answered_in(quiz) == quiz.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, OptionIndex)> + '_ {
        self.0.iter().map(|(id, choice)| (*id, *choice))
    }
}

impl FromIterator<(QuestionId, OptionIndex)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (QuestionId, OptionIndex)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
