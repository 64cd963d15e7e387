//! Integration tests for the assessment workflow.
//!
//! These tests drive a session end to end through the public API:
//! 1. A topic is submitted and a quiz is generated (or substituted)
//! 2. Answers are recorded and the quiz is scored
//! 3. A roadmap is generated (or substituted) for the computed level
//! 4. The finished session is reported, exported and restarted
//!
//! Uses the scripted mock client so no generation API is contacted.

use std::sync::Arc;
use std::time::Duration;

use skill_roadmap::adapters::ai::MockGenerationClient;
use skill_roadmap::adapters::document::MockDocumentRenderer;
use skill_roadmap::adapters::fallback::StaticFallbackCatalog;
use skill_roadmap::application::{
    AssessmentWorkflow, CancelSignal, RoadmapSynthesizer, SynthesizerError, SynthesizerSettings,
};
use skill_roadmap::domain::assessment::{ProficiencyLevel, Quiz};
use skill_roadmap::domain::roadmap::{RoadmapStep, TimeCommitment};
use skill_roadmap::domain::session::{SessionError, Stage};
use skill_roadmap::ports::{ExportFormat, FallbackCatalog, TransportFailure};

// =============================================================================
// Test Infrastructure
// =============================================================================

const RUST_QUIZ: &str = r#"Sure! Here is your quiz:
[
  {"id": 1, "question": "Which keyword declares an immutable binding?", "options": ["let", "mut", "const fn", "static mut"], "correctAnswer": 0, "conceptTag": "Bindings"},
  {"id": 2, "question": "What does the borrow checker enforce?", "options": ["Type inference", "Aliasing XOR mutation", "Tail calls", "Garbage collection"], "correctAnswer": 1, "conceptTag": "Ownership"},
  {"id": 3, "question": "Which trait enables the ? operator on a custom error?", "options": ["Display", "Clone", "From", "Default"], "correctAnswer": 2, "conceptTag": "Error Handling"}
]"#;

fn rust_roadmap(weeks: u32) -> String {
    let steps: Vec<String> = (1..=weeks)
        .map(|week| {
            format!(
                r#"{{"week": {week}, "title": "Week {week} focus", "description": "Practice for week {week}.", "concepts": ["Ownership"], "milestone": "Ship exercise {week}"}}"#
            )
        })
        .collect();
    format!("[{}]", steps.join(","))
}

fn workflow_with(client: MockGenerationClient) -> AssessmentWorkflow {
    let synthesizer = RoadmapSynthesizer::new(
        Arc::new(client),
        Arc::new(StaticFallbackCatalog::new()),
        SynthesizerSettings::default(),
    )
    .expect("bundled catalog covers the default topic");
    AssessmentWorkflow::new(Arc::new(synthesizer))
}

/// Catalog with nothing in it.
struct EmptyCatalog;

impl FallbackCatalog for EmptyCatalog {
    fn quiz(&self, _topic: &str) -> Option<Quiz> {
        None
    }

    fn roadmap(
        &self,
        _topic: &str,
        _level: ProficiencyLevel,
        _weeks: TimeCommitment,
    ) -> Option<Vec<RoadmapStep>> {
        None
    }
}

// =============================================================================
// Fallback path
// =============================================================================

#[tokio::test]
async fn python_session_falls_back_and_scores_intermediate() {
    let client = MockGenerationClient::new()
        .with_failure(TransportFailure::unavailable("quota exhausted"))
        .with_failure(TransportFailure::Timeout { timeout_secs: 60 });
    let workflow = workflow_with(client.clone());

    let session = workflow.submit_topic("Python", 6).await.unwrap();
    assert_eq!(session.stage(), Stage::QuizActive);
    assert_eq!(session.quiz().unwrap().len(), 2);
    assert!(session.last_error().unwrap().contains("quota exhausted"));

    workflow.record_answer(1, 1).await.unwrap();
    workflow.record_answer(2, 0).await.unwrap();
    let session = workflow.submit_quiz().await.unwrap();

    assert_eq!(session.stage(), Stage::Results);
    let score = session.score().unwrap();
    assert_eq!(score.correct_count(), 1);
    assert_eq!(score.total_questions(), 2);
    assert_eq!(score.level(), ProficiencyLevel::Intermediate);
    assert_eq!(
        score.weak_concepts().iter().collect::<Vec<_>>(),
        vec!["Data Types"]
    );

    let roadmap = session.roadmap().unwrap();
    assert_eq!(roadmap.topic(), "Python");
    assert_eq!(roadmap.level(), ProficiencyLevel::Intermediate);
    assert_eq!(roadmap.weeks(), TimeCommitment::SixWeeks);
    assert_eq!(
        roadmap.steps()[0].title,
        "Object-Oriented Programming Fundamentals"
    );
    assert!(session.last_error().unwrap().contains("timed out"));
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn unparseable_output_falls_back_with_parse_diagnostic() {
    let client = MockGenerationClient::new()
        .with_response("I'm sorry, I can't help with that.")
        .with_response("[]");
    let workflow = workflow_with(client);

    let session = workflow.submit_topic("Python", 12).await.unwrap();
    assert!(session
        .last_error()
        .unwrap()
        .contains("no bracketed JSON array found"));

    workflow.record_answer(1, 0).await.unwrap();
    workflow.record_answer(2, 0).await.unwrap();
    let session = workflow.submit_quiz().await.unwrap();

    assert_eq!(session.score().unwrap().level(), ProficiencyLevel::Foundational);
    assert_eq!(session.roadmap().unwrap().weeks(), TimeCommitment::TwelveWeeks);
    assert!(session.last_error().unwrap().contains("generated array is empty"));
}

#[tokio::test]
async fn unknown_topic_keeps_its_name_on_substituted_content() {
    let workflow = workflow_with(MockGenerationClient::new());

    let session = workflow.submit_topic("Underwater Basket Weaving", 6).await.unwrap();
    assert!(session.last_error().unwrap().contains("substituted 'Python' content"));

    workflow.record_answer(1, 1).await.unwrap();
    workflow.record_answer(2, 2).await.unwrap();
    let session = workflow.submit_quiz().await.unwrap();

    let roadmap = session.roadmap().unwrap();
    assert_eq!(roadmap.topic(), "Underwater Basket Weaving");
    assert_eq!(roadmap.level(), ProficiencyLevel::Advanced);
    assert!(!roadmap.steps().is_empty());
}

#[test]
fn synthesizer_refuses_catalog_without_default_content() {
    let result = RoadmapSynthesizer::new(
        Arc::new(MockGenerationClient::new()),
        Arc::new(EmptyCatalog),
        SynthesizerSettings::default(),
    );

    assert!(matches!(result, Err(SynthesizerError::MissingDefaultQuiz(topic)) if topic == "Python"));
}

// =============================================================================
// Generated path
// =============================================================================

#[tokio::test]
async fn generated_quiz_and_roadmap_are_used_as_is() {
    let client = MockGenerationClient::new()
        .with_response(RUST_QUIZ)
        .with_response(rust_roadmap(12));
    let workflow = workflow_with(client.clone());

    let session = workflow.submit_topic("  Rust  ", 12).await.unwrap();
    assert_eq!(session.topic(), Some("Rust"));
    assert_eq!(session.quiz().unwrap().len(), 3);
    assert_eq!(session.last_error(), None);

    workflow.record_answer(1, 0).await.unwrap();
    workflow.record_answer(2, 1).await.unwrap();
    workflow.record_answer(3, 2).await.unwrap();
    let session = workflow.submit_quiz().await.unwrap();

    assert_eq!(session.last_error(), None);
    assert!(session.score().unwrap().is_perfect());
    let roadmap = session.roadmap().unwrap();
    assert_eq!(roadmap.level(), ProficiencyLevel::Advanced);
    assert_eq!(roadmap.steps().len(), 12);
    assert!(roadmap.weak_concepts().is_empty());

    let calls = client.get_calls();
    assert!(calls[0].prompt.contains("quiz about Rust"));
    assert!(calls[1].prompt.contains("at Advanced level"));
    assert!(calls[1].prompt.contains("exactly 12 entries"));
    assert!(calls[1].prompt.contains("no specific weak areas"));
}

#[tokio::test]
async fn changed_answer_counts_only_once() {
    let client = MockGenerationClient::new().with_response(RUST_QUIZ);
    let workflow = workflow_with(client);
    workflow.submit_topic("Rust", 6).await.unwrap();

    workflow.record_answer(1, 3).await.unwrap();
    workflow.record_answer(1, 0).await.unwrap();
    workflow.record_answer(2, 0).await.unwrap();
    workflow.record_answer(3, 0).await.unwrap();
    let session = workflow.submit_quiz().await.unwrap();

    let score = session.score().unwrap();
    assert_eq!(score.correct_count(), 1);
    assert_eq!(score.level(), ProficiencyLevel::Intermediate);
    assert_eq!(
        score.weak_concepts().iter().collect::<Vec<_>>(),
        vec!["Error Handling", "Ownership"]
    );
}

#[tokio::test]
async fn answer_to_unknown_question_is_rejected() {
    let workflow = workflow_with(MockGenerationClient::new());
    workflow.submit_topic("Python", 6).await.unwrap();
    let before = workflow.snapshot().await;

    assert!(matches!(
        workflow.record_answer(9, 0).await,
        Err(SessionError::Validation(_))
    ));
    assert!(matches!(
        workflow.record_answer(1, 4).await,
        Err(SessionError::Validation(_))
    ));
    assert_eq!(workflow.snapshot().await, before);
}

// =============================================================================
// Report and export
// =============================================================================

#[tokio::test]
async fn report_describes_finished_session() {
    let workflow = workflow_with(MockGenerationClient::new());
    workflow.submit_topic("Python", 6).await.unwrap();
    workflow.record_answer(1, 1).await.unwrap();
    workflow.record_answer(2, 0).await.unwrap();
    workflow.submit_quiz().await.unwrap();

    let report = workflow.report().await.unwrap();

    assert!(report.starts_with("Learning Roadmap for Python\n"));
    assert!(report.contains("Skill Level: Intermediate\n"));
    assert!(report.contains("Score: 1 out of 2\n"));
    assert!(report.contains("Areas to focus on: Data Types\n"));
    assert!(report.contains("Week 1: Object-Oriented Programming Fundamentals\n"));
    assert_eq!(workflow.report().await.unwrap(), report);

    let document = workflow
        .export(ExportFormat::Text, &MockDocumentRenderer::returning(Vec::new()))
        .await
        .unwrap();
    assert_eq!(document.filename, "Python-Learning-Roadmap.txt");
    assert_eq!(document.content, report.into_bytes());
}

#[tokio::test]
async fn report_before_results_is_invalid_state() {
    let workflow = workflow_with(MockGenerationClient::new());
    workflow.submit_topic("Python", 6).await.unwrap();

    assert!(matches!(
        workflow.report().await,
        Err(SessionError::InvalidState {
            stage: Stage::QuizActive,
            ..
        })
    ));
}

// =============================================================================
// Restart
// =============================================================================

#[tokio::test]
async fn restart_discards_everything() {
    let workflow = workflow_with(MockGenerationClient::new());
    let first = workflow.submit_topic("Python", 12).await.unwrap();
    workflow.record_answer(1, 1).await.unwrap();
    workflow.record_answer(2, 0).await.unwrap();
    workflow.submit_quiz().await.unwrap();

    let fresh = workflow.restart().await.unwrap();

    assert_ne!(fresh.id(), first.id());
    assert_eq!(fresh.stage(), Stage::TopicInput);
    assert_eq!(fresh.topic(), None);
    assert!(fresh.quiz().is_none());
    assert!(fresh.answers().is_empty());
    assert!(fresh.score().is_none());
    assert!(fresh.roadmap().is_none());
    assert_eq!(fresh.last_error(), None);

    let next = workflow.submit_topic("JavaScript", 6).await.unwrap();
    assert_eq!(next.topic(), Some("JavaScript"));
    assert_eq!(next.time_commitment(), TimeCommitment::SixWeeks);
    assert!(next.answers().is_empty());
}

#[tokio::test]
async fn restart_from_quiz_abandons_answers() {
    let workflow = workflow_with(MockGenerationClient::new());
    workflow.submit_topic("Python", 6).await.unwrap();
    workflow.record_answer(1, 1).await.unwrap();

    let fresh = workflow.restart().await.unwrap();

    assert_eq!(fresh.stage(), Stage::TopicInput);
    assert!(fresh.answers().is_empty());
}

// =============================================================================
// Concurrency and cancellation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn second_submission_during_generation_is_in_progress() {
    let client = MockGenerationClient::new()
        .with_response(RUST_QUIZ)
        .with_delay(Duration::from_secs(2));
    let workflow = workflow_with(client.clone());

    let (first, second) = tokio::join!(
        workflow.submit_topic("Rust", 6),
        workflow.submit_topic("Go", 6)
    );

    assert_eq!(first.unwrap().topic(), Some("Rust"));
    assert_eq!(
        second,
        Err(SessionError::RequestInProgress {
            stage: Stage::QuizGenerating
        })
    );
    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn answering_during_generation_is_invalid_state() {
    let client = MockGenerationClient::new().with_delay(Duration::from_secs(2));
    let workflow = workflow_with(client);

    let (generated, answered) = tokio::join!(
        workflow.submit_topic("Python", 6),
        workflow.record_answer(1, 1)
    );

    assert!(generated.is_ok());
    assert!(matches!(
        answered,
        Err(SessionError::InvalidState {
            stage: Stage::QuizGenerating,
            ..
        })
    ));
    assert!(workflow.snapshot().await.answers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancelled_generation_uses_bundled_quiz() {
    let client = MockGenerationClient::new()
        .with_response(RUST_QUIZ)
        .with_delay(Duration::from_secs(60));
    let workflow = workflow_with(client);
    let (handle, signal) = CancelSignal::channel();

    let (session, ()) = tokio::join!(
        workflow.submit_topic_cancellable("Python", 6, &signal),
        async move { handle.cancel() }
    );

    let session = session.unwrap();
    assert_eq!(session.stage(), Stage::QuizActive);
    assert_eq!(session.quiz().unwrap().len(), 2);
    assert!(session.last_error().unwrap().contains("generation cancelled"));
}

#[tokio::test(start_paused = true)]
async fn abandoned_topic_submission_still_stores_quiz() {
    let client = MockGenerationClient::new()
        .with_response(RUST_QUIZ)
        .with_delay(Duration::from_secs(10));
    let workflow = workflow_with(client.clone());

    let abandoned =
        tokio::time::timeout(Duration::from_secs(1), workflow.submit_topic("Rust", 6)).await;
    assert!(abandoned.is_err());
    assert_eq!(workflow.snapshot().await.stage(), Stage::QuizGenerating);

    tokio::time::sleep(Duration::from_secs(120)).await;

    let session = workflow.snapshot().await;
    assert_eq!(session.stage(), Stage::QuizActive);
    assert_eq!(session.topic(), Some("Rust"));
    assert_eq!(session.quiz().unwrap().len(), 2);
    assert_eq!(client.call_count(), 1);

    let fresh = workflow.restart().await.unwrap();
    assert_eq!(fresh.stage(), Stage::TopicInput);
    assert!(workflow.submit_topic("Python", 6).await.is_ok());
}
