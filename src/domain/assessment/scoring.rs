//! Scoring Engine - turns a quiz and its answers into a score and weak areas.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::{AnswerMap, Quiz};
use crate::domain::foundation::ValidationError;

/// Proficiency band derived from the quiz score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Foundational,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    /// All levels, lowest first.
    pub const ALL: [ProficiencyLevel; 3] = [
        ProficiencyLevel::Foundational,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
    ];

    /// Classifies `correct` out of `total` with inclusive 30% / 70% cut-offs.
    ///
    /// Integer arithmetic keeps the boundaries exact: `correct <= 0.3 * total`
    /// is evaluated as `10 * correct <= 3 * total`.
    pub fn classify(correct: usize, total: usize) -> Self {
        if correct * 10 <= total * 3 {
            ProficiencyLevel::Foundational
        } else if correct * 10 <= total * 7 {
            ProficiencyLevel::Intermediate
        } else {
            ProficiencyLevel::Advanced
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            ProficiencyLevel::Foundational => "Foundational",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "foundational" | "beginner" => Ok(ProficiencyLevel::Foundational),
            "intermediate" => Ok(ProficiencyLevel::Intermediate),
            "advanced" => Ok(ProficiencyLevel::Advanced),
            other => Err(ValidationError::invalid_format(
                "level",
                format!("unknown proficiency level '{}'", other),
            )),
        }
    }
}

/// Outcome of one scoring pass. Recomputed from scratch, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    correct_count: usize,
    total_questions: usize,
    weak_concepts: BTreeSet<String>,
}

impl ScoreResult {
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// Deduplicated weak concept tags, in lexical order.
    pub fn weak_concepts(&self) -> &BTreeSet<String> {
        &self.weak_concepts
    }

    pub fn is_perfect(&self) -> bool {
        self.correct_count == self.total_questions
    }

    pub fn level(&self) -> ProficiencyLevel {
        ProficiencyLevel::classify(self.correct_count, self.total_questions)
    }
}

/// Pure scoring service.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores `answers` against `quiz`.
    ///
    /// Missing answers count as incorrect. A concept tag is weak when some
    /// question carrying it was missed and no question carrying it was
    /// answered correctly.
    pub fn score(quiz: &Quiz, answers: &AnswerMap) -> ScoreResult {
        let mut correct_count = 0;
        let mut missed = BTreeSet::new();
        let mut mastered = BTreeSet::new();

        for question in quiz.questions() {
            let answered_correctly = answers
                .get(question.id())
                .is_some_and(|choice| question.is_correct(choice));

            if answered_correctly {
                correct_count += 1;
                mastered.insert(question.concept_tag());
            } else {
                missed.insert(question.concept_tag());
            }
        }

        let weak_concepts = missed
            .difference(&mastered)
            .map(|tag| tag.to_string())
            .collect();

        ScoreResult {
            correct_count,
            total_questions: quiz.len(),
            weak_concepts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::question::test_support::quiz;
    use crate::domain::assessment::OptionIndex;
    use crate::domain::foundation::QuestionId;
    use proptest::prelude::*;

    fn answers(pairs: &[(u32, u8)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(id, choice)| {
                (
                    QuestionId::new(*id).unwrap(),
                    OptionIndex::new(*choice).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn python_example_scores_intermediate() {
        let quiz = quiz(&[(1, "Functions"), (2, "Data Types")]);
        let result = ScoringEngine::score(&quiz, &answers(&[(1, 1), (2, 0)]));

        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.total_questions(), 2);
        assert_eq!(
            result.weak_concepts().iter().collect::<Vec<_>>(),
            vec!["Data Types"]
        );
        assert_eq!(result.level(), ProficiencyLevel::Intermediate);
    }

    #[test]
    fn missing_answers_count_as_incorrect() {
        let quiz = quiz(&[(0, "A"), (0, "B")]);
        let result = ScoringEngine::score(&quiz, &AnswerMap::new());

        assert_eq!(result.correct_count(), 0);
        assert_eq!(result.weak_concepts().len(), 2);
        assert_eq!(result.level(), ProficiencyLevel::Foundational);
    }

    #[test]
    fn duplicate_missed_tags_collapse() {
        let quiz = quiz(&[(0, "Loops"), (0, "Loops"), (0, "Loops")]);
        let result = ScoringEngine::score(&quiz, &answers(&[(1, 1), (2, 1), (3, 1)]));

        assert_eq!(result.weak_concepts().len(), 1);
    }

    #[test]
    fn tag_answered_correctly_elsewhere_is_not_weak() {
        let quiz = quiz(&[(0, "Loops"), (0, "Loops"), (0, "Classes")]);
        let result = ScoringEngine::score(&quiz, &answers(&[(1, 0), (2, 3), (3, 3)]));

        assert_eq!(result.correct_count(), 1);
        assert_eq!(
            result.weak_concepts().iter().collect::<Vec<_>>(),
            vec!["Classes"]
        );
    }

    #[test]
    fn perfect_score_is_advanced() {
        let quiz = quiz(&[(0, "A"), (1, "B"), (2, "C")]);
        let result = ScoringEngine::score(&quiz, &answers(&[(1, 0), (2, 1), (3, 2)]));

        assert!(result.is_perfect());
        assert!(result.weak_concepts().is_empty());
        assert_eq!(result.level(), ProficiencyLevel::Advanced);
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        // 10 questions: <=3 foundational, 4..=7 intermediate, >=8 advanced
        assert_eq!(ProficiencyLevel::classify(3, 10), ProficiencyLevel::Foundational);
        assert_eq!(ProficiencyLevel::classify(4, 10), ProficiencyLevel::Intermediate);
        assert_eq!(ProficiencyLevel::classify(7, 10), ProficiencyLevel::Intermediate);
        assert_eq!(ProficiencyLevel::classify(8, 10), ProficiencyLevel::Advanced);
        // 5 questions: 1 -> 0.2, 2 -> 0.4, 3 -> 0.6, 4 -> 0.8
        assert_eq!(ProficiencyLevel::classify(1, 5), ProficiencyLevel::Foundational);
        assert_eq!(ProficiencyLevel::classify(2, 5), ProficiencyLevel::Intermediate);
        assert_eq!(ProficiencyLevel::classify(3, 5), ProficiencyLevel::Intermediate);
        assert_eq!(ProficiencyLevel::classify(4, 5), ProficiencyLevel::Advanced);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("advanced".parse::<ProficiencyLevel>().unwrap(), ProficiencyLevel::Advanced);
        assert_eq!(" Intermediate ".parse::<ProficiencyLevel>().unwrap(), ProficiencyLevel::Intermediate);
        assert!("expert".parse::<ProficiencyLevel>().is_err());
    }

    #[test]
    fn level_serializes_as_label() {
        let json = serde_json::to_string(&ProficiencyLevel::Foundational).unwrap();
        assert_eq!(json, "\"Foundational\"");
    }

    fn quiz_and_answers() -> impl Strategy<Value = (Vec<(u8, u8)>, Vec<Option<u8>>)> {
        prop::collection::vec((0u8..4, 0u8..3), 1..12).prop_flat_map(|questions| {
            let n = questions.len();
            (
                Just(questions),
                prop::collection::vec(prop::option::of(0u8..4), n),
            )
        })
    }

    proptest! {
        #[test]
        fn correct_count_is_bounded_and_perfect_iff_all_match(
            (questions, picks) in quiz_and_answers()
        ) {
            let tags = ["Syntax", "Types", "Loops"];
            let spec: Vec<(u8, &str)> = questions
                .iter()
                .map(|(correct, tag)| (*correct, tags[*tag as usize]))
                .collect();
            let quiz = quiz(&spec);
            let answers: AnswerMap = picks
                .iter()
                .enumerate()
                .filter_map(|(i, pick)| pick.map(|p| (
                    QuestionId::new(i as u32 + 1).unwrap(),
                    OptionIndex::new(p).unwrap(),
                )))
                .collect();

            let result = ScoringEngine::score(&quiz, &answers);
            prop_assert!(result.correct_count() <= quiz.len());

            let all_match = quiz
                .questions()
                .iter()
                .all(|q| answers.get(q.id()) == Some(q.correct_option()));
            prop_assert_eq!(result.correct_count() == quiz.len(), all_match);
        }

        #[test]
        fn weak_concepts_exclude_correctly_answered_tags(
            (questions, picks) in quiz_and_answers()
        ) {
            let tags = ["Syntax", "Types", "Loops"];
            let spec: Vec<(u8, &str)> = questions
                .iter()
                .map(|(correct, tag)| (*correct, tags[*tag as usize]))
                .collect();
            let quiz = quiz(&spec);
            let answers: AnswerMap = picks
                .iter()
                .enumerate()
                .filter_map(|(i, pick)| pick.map(|p| (
                    QuestionId::new(i as u32 + 1).unwrap(),
                    OptionIndex::new(p).unwrap(),
                )))
                .collect();

            let result = ScoringEngine::score(&quiz, &answers);
            for question in quiz.questions() {
                if answers.get(question.id()) == Some(question.correct_option()) {
                    prop_assert!(!result.weak_concepts().contains(question.concept_tag()));
                }
            }
        }

        #[test]
        fn level_is_monotonic_in_correct_count(total in 1usize..50, a in 0usize..50, b in 0usize..50) {
            let (lo, hi) = (a.min(b).min(total), a.max(b).min(total));
            prop_assert!(ProficiencyLevel::classify(lo, total) <= ProficiencyLevel::classify(hi, total));
        }
    }
}
