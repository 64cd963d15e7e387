//! Session aggregate.
//!
//! The session is the single root for everything the workflow knows about
//! one assessment attempt. Every transition is a method that validates
//! against the current value and returns a complete replacement, so a
//! rejected operation can never leave half-updated fields behind.

use serde::{Deserialize, Serialize};

use super::{SessionError, Stage};
use crate::domain::assessment::{AnswerMap, OptionIndex, Quiz, ScoreResult, ScoringEngine};
use crate::domain::foundation::{QuestionId, SessionId, StateMachine, Timestamp, ValidationError};
use crate::domain::roadmap::{Roadmap, TimeCommitment};

/// Assessment session aggregate.
///
/// # Invariants
///
/// - `quiz` is present from `QuizActive` onwards
/// - `answers` keys are a subset of the active quiz's question ids
/// - `score` is present from `RoadmapGenerating` onwards
/// - `roadmap` is present only in `Results`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    stage: Stage,
    topic: Option<String>,
    time_commitment: TimeCommitment,
    quiz: Option<Quiz>,
    answers: AnswerMap,
    score: Option<ScoreResult>,
    roadmap: Option<Roadmap>,
    last_error: Option<String>,
    started_at: Timestamp,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a fresh session waiting for a topic.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            stage: Stage::TopicInput,
            topic: None,
            time_commitment: TimeCommitment::default(),
            quiz: None,
            answers: AnswerMap::new(),
            score: None,
            roadmap: None,
            last_error: None,
            started_at: Timestamp::now(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn time_commitment(&self) -> TimeCommitment {
        self.time_commitment
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        self.score.as_ref()
    }

    pub fn roadmap(&self) -> Option<&Roadmap> {
        self.roadmap.as_ref()
    }

    /// Diagnostic left by the most recent generation, if it fell back.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// `TopicInput --submit_topic--> QuizGenerating`.
    ///
    /// # Errors
    ///
    /// - `RequestInProgress` if a generation is already in flight
    /// - `InvalidState` outside `TopicInput`
    /// - `Validation` for a blank topic or unsupported week count
    pub fn submit_topic(&self, topic: &str, weeks: u32) -> Result<Session, SessionError> {
        self.ensure_can_issue_generation(Stage::QuizGenerating, "submit a topic")?;

        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::empty_field("topic").into());
        }
        let time_commitment = TimeCommitment::try_from(weeks)?;

        Ok(Session {
            stage: Stage::QuizGenerating,
            topic: Some(topic.to_string()),
            time_commitment,
            quiz: None,
            answers: AnswerMap::new(),
            score: None,
            roadmap: None,
            last_error: None,
            ..self.clone()
        })
    }

    /// `QuizGenerating --quiz ready--> QuizActive`. Clears any answers.
    pub fn quiz_ready(&self, quiz: Quiz, diagnostic: Option<String>) -> Result<Session, SessionError> {
        if self.stage != Stage::QuizGenerating {
            return Err(SessionError::invalid_state(self.stage, "store a generated quiz"));
        }

        Ok(Session {
            stage: Stage::QuizActive,
            quiz: Some(quiz),
            answers: AnswerMap::new(),
            last_error: diagnostic,
            ..self.clone()
        })
    }

    /// `QuizActive --record_answer--> QuizActive`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` outside `QuizActive`
    /// - `Validation` for an unknown question id or an option outside `0..=3`
    pub fn record_answer(&self, question_id: u32, option_index: u8) -> Result<Session, SessionError> {
        let quiz = match (&self.stage, &self.quiz) {
            (Stage::QuizActive, Some(quiz)) => quiz,
            _ => return Err(SessionError::invalid_state(self.stage, "record an answer")),
        };

        let id = QuestionId::new(question_id)
            .filter(|id| quiz.contains(*id))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "question_id",
                    format!("question {} is not part of the active quiz", question_id),
                )
            })?;
        let choice = OptionIndex::new(option_index)?;

        let mut answers = self.answers.clone();
        answers.record(id, choice);

        Ok(Session {
            answers,
            ..self.clone()
        })
    }

    /// `QuizActive --submit_quiz--> RoadmapGenerating`. Scores the answers.
    ///
    /// # Errors
    ///
    /// - `RequestInProgress` if a generation is already in flight
    /// - `InvalidState` outside `QuizActive`
    /// - `IncompleteAnswers` unless every question has an answer
    pub fn submit_quiz(&self) -> Result<Session, SessionError> {
        self.ensure_can_issue_generation(Stage::RoadmapGenerating, "submit the quiz")?;

        let quiz = self
            .quiz
            .as_ref()
            .ok_or_else(|| SessionError::invalid_state(self.stage, "submit the quiz"))?;

        if !self.answers.covers(quiz) {
            return Err(SessionError::incomplete(self.answers.answered_in(quiz), quiz.len()));
        }

        let score = ScoringEngine::score(quiz, &self.answers);

        Ok(Session {
            stage: Stage::RoadmapGenerating,
            score: Some(score),
            ..self.clone()
        })
    }

    /// `RoadmapGenerating --roadmap ready--> Results`.
    pub fn roadmap_ready(
        &self,
        roadmap: Roadmap,
        diagnostic: Option<String>,
    ) -> Result<Session, SessionError> {
        if self.stage != Stage::RoadmapGenerating {
            return Err(SessionError::invalid_state(self.stage, "store a generated roadmap"));
        }

        Ok(Session {
            stage: Stage::Results,
            roadmap: Some(roadmap),
            last_error: diagnostic,
            ..self.clone()
        })
    }

    /// `QuizActive | Results --restart--> TopicInput` with a brand-new session.
    pub fn restart(&self) -> Result<Session, SessionError> {
        self.ensure_transition(Stage::TopicInput, "restart")?;
        Ok(Session::new())
    }

    fn ensure_transition(&self, target: Stage, operation: &'static str) -> Result<(), SessionError> {
        self.stage
            .transition_to(target)
            .map(|_| ())
            .map_err(|_| SessionError::invalid_state(self.stage, operation))
    }

    fn ensure_can_issue_generation(
        &self,
        target: Stage,
        operation: &'static str,
    ) -> Result<(), SessionError> {
        if self.stage.is_generating() {
            return Err(SessionError::in_progress(self.stage));
        }
        self.ensure_transition(target, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::question::test_support::quiz;
    use crate::domain::assessment::ProficiencyLevel;
    use std::collections::BTreeSet;

    fn python_quiz() -> Quiz {
        quiz(&[(1, "Functions"), (2, "Data Types")])
    }

    fn active_session() -> Session {
        Session::new()
            .submit_topic("Python", 6)
            .unwrap()
            .quiz_ready(python_quiz(), None)
            .unwrap()
    }

    fn roadmap() -> Roadmap {
        Roadmap::new(
            "Python",
            ProficiencyLevel::Intermediate,
            TimeCommitment::SixWeeks,
            vec![],
            BTreeSet::new(),
        )
    }

    #[test]
    fn new_session_waits_for_topic() {
        let session = Session::new();
        assert_eq!(session.stage(), Stage::TopicInput);
        assert!(session.topic().is_none());
        assert!(session.quiz().is_none());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn submit_topic_trims_and_records_commitment() {
        let session = Session::new().submit_topic("  Rust  ", 12).unwrap();
        assert_eq!(session.stage(), Stage::QuizGenerating);
        assert_eq!(session.topic(), Some("Rust"));
        assert_eq!(session.time_commitment(), TimeCommitment::TwelveWeeks);
    }

    #[test]
    fn submit_topic_rejects_blank_topic() {
        let session = Session::new();
        let err = session.submit_topic("   ", 6).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }

    #[test]
    fn submit_topic_rejects_unsupported_weeks() {
        let err = Session::new().submit_topic("Rust", 8).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }

    #[test]
    fn submit_topic_while_generating_is_in_progress() {
        let generating = Session::new().submit_topic("Rust", 6).unwrap();
        let err = generating.submit_topic("Go", 6).unwrap_err();
        assert_eq!(err, SessionError::in_progress(Stage::QuizGenerating));
    }

    #[test]
    fn submit_topic_during_quiz_is_invalid_state() {
        let err = active_session().submit_topic("Go", 6).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { stage: Stage::QuizActive, .. }));
    }

    #[test]
    fn quiz_ready_requires_generating_stage() {
        let err = Session::new().quiz_ready(python_quiz(), None).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
    }

    #[test]
    fn quiz_ready_stores_quiz_and_diagnostic() {
        let session = Session::new()
            .submit_topic("Rust", 6)
            .unwrap()
            .quiz_ready(python_quiz(), Some("fell back".to_string()))
            .unwrap();

        assert_eq!(session.stage(), Stage::QuizActive);
        assert_eq!(session.quiz().unwrap().len(), 2);
        assert_eq!(session.last_error(), Some("fell back"));
    }

    #[test]
    fn record_answer_upserts() {
        let session = active_session()
            .record_answer(1, 0)
            .unwrap()
            .record_answer(1, 1)
            .unwrap();

        assert_eq!(session.answers().len(), 1);
        assert_eq!(
            session.answers().get(QuestionId::new(1).unwrap()).unwrap().value(),
            1
        );
    }

    #[test]
    fn record_answer_rejects_unknown_question() {
        let session = active_session();
        assert!(matches!(session.record_answer(9, 0), Err(SessionError::Validation(_))));
        assert!(matches!(session.record_answer(0, 0), Err(SessionError::Validation(_))));
    }

    #[test]
    fn record_answer_rejects_out_of_range_option() {
        let err = active_session().record_answer(1, 4).unwrap_err();
        assert!(matches!(err, SessionError::Validation(ValidationError::OutOfRange { .. })));
    }

    #[test]
    fn record_answer_outside_quiz_is_invalid_state() {
        let err = Session::new().record_answer(1, 0).unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { stage: Stage::TopicInput, .. }));
    }

    #[test]
    fn submit_quiz_requires_all_answers() {
        let session = active_session().record_answer(1, 1).unwrap();
        let err = session.submit_quiz().unwrap_err();
        assert_eq!(err, SessionError::incomplete(1, 2));
    }

    #[test]
    fn submit_quiz_scores_answers() {
        let session = active_session()
            .record_answer(1, 1)
            .unwrap()
            .record_answer(2, 0)
            .unwrap()
            .submit_quiz()
            .unwrap();

        assert_eq!(session.stage(), Stage::RoadmapGenerating);
        let score = session.score().unwrap();
        assert_eq!(score.correct_count(), 1);
        assert!(score.weak_concepts().contains("Data Types"));
    }

    #[test]
    fn submit_quiz_twice_is_in_progress() {
        let session = active_session()
            .record_answer(1, 1)
            .unwrap()
            .record_answer(2, 2)
            .unwrap()
            .submit_quiz()
            .unwrap();

        assert_eq!(
            session.submit_quiz().unwrap_err(),
            SessionError::in_progress(Stage::RoadmapGenerating)
        );
    }

    #[test]
    fn roadmap_ready_moves_to_results() {
        let session = active_session()
            .record_answer(1, 1)
            .unwrap()
            .record_answer(2, 2)
            .unwrap()
            .submit_quiz()
            .unwrap()
            .roadmap_ready(roadmap(), None)
            .unwrap();

        assert_eq!(session.stage(), Stage::Results);
        assert!(session.roadmap().is_some());
    }

    #[test]
    fn restart_clears_everything() {
        let finished = active_session()
            .record_answer(1, 1)
            .unwrap()
            .record_answer(2, 2)
            .unwrap()
            .submit_quiz()
            .unwrap()
            .roadmap_ready(roadmap(), Some("diag".to_string()))
            .unwrap();

        let fresh = finished.restart().unwrap();
        assert_eq!(fresh.stage(), Stage::TopicInput);
        assert_ne!(fresh.id(), finished.id());
        assert!(fresh.topic().is_none());
        assert!(fresh.quiz().is_none());
        assert!(fresh.answers().is_empty());
        assert!(fresh.score().is_none());
        assert!(fresh.roadmap().is_none());
        assert!(fresh.last_error().is_none());
    }

    #[test]
    fn restart_from_topic_input_is_invalid() {
        assert!(matches!(
            Session::new().restart(),
            Err(SessionError::InvalidState { .. })
        ));
    }

    #[test]
    fn rejected_operation_leaves_session_untouched() {
        let session = active_session();
        let before = session.clone();
        let _ = session.record_answer(42, 0);
        let _ = session.submit_quiz();
        assert_eq!(session, before);
    }
}
