//! AssessmentWorkflow - drives one session through the assessment stages.
//!
//! The workflow is the sole owner of the [`Session`]. Every operation swaps
//! in the value returned by a session transition, so a rejected operation
//! leaves the stored session untouched. The lock is released before any
//! generation call, which is what lets a concurrent request observe the
//! `*Generating` stage and be turned away.
//!
//! Generation and the store that follows it run on a spawned task. A
//! caller that stops waiting (timeout, `select!`, dropped request) does not
//! stop the task, so the session always leaves its `*Generating` stage.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::synthesizer::{ContentOrigin, RoadmapSynthesizer};
use super::CancelSignal;
use crate::domain::export::ReportSerializer;
use crate::domain::session::{Session, SessionError, Stage};
use crate::ports::{DocumentRenderer, ExportError, ExportFormat, ExportedDocument, RenderRequest};

/// Single-session assessment workflow.
pub struct AssessmentWorkflow {
    session: Arc<Mutex<Session>>,
    synthesizer: Arc<RoadmapSynthesizer>,
}

impl AssessmentWorkflow {
    pub fn new(synthesizer: Arc<RoadmapSynthesizer>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            synthesizer,
        }
    }

    /// A copy of the current session.
    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    /// Submits a topic and waits for the quiz.
    pub async fn submit_topic(&self, topic: &str, weeks: u32) -> Result<Session, SessionError> {
        self.submit_topic_cancellable(topic, weeks, &CancelSignal::never())
            .await
    }

    /// Submits a topic; `cancel` aborts generation in favor of fallback content.
    ///
    /// # Errors
    ///
    /// - `RequestInProgress` while a generation is in flight
    /// - `InvalidState` outside `TopicInput`
    /// - `Validation` for a blank topic or unsupported week count
    pub async fn submit_topic_cancellable(
        &self,
        topic: &str,
        weeks: u32,
        cancel: &CancelSignal,
    ) -> Result<Session, SessionError> {
        let generating = {
            let mut session = self.session.lock().await;
            let next = session.submit_topic(topic, weeks)?;
            *session = next.clone();
            next
        };
        let topic = generating.topic().unwrap_or_default().to_string();

        tracing::info!(
            session_id = %generating.id(),
            topic = %topic,
            weeks = generating.time_commitment().weeks(),
            stage = %generating.stage(),
            "topic submitted; generating quiz"
        );

        let session = Arc::clone(&self.session);
        let synthesizer = Arc::clone(&self.synthesizer);
        let cancel = cancel.clone();
        let task = tokio::spawn(async move {
            let quiz = synthesizer.synthesize_quiz(&topic, &cancel).await;

            let mut session = session.lock().await;
            let next = session.quiz_ready(quiz.value, quiz.diagnostic)?;
            *session = next.clone();

            tracing::info!(
                session_id = %next.id(),
                questions = next.quiz().map(|q| q.len()).unwrap_or(0),
                fallback = quiz.origin != ContentOrigin::Generated,
                stage = %next.stage(),
                "quiz ready"
            );
            Ok(next)
        });

        join_generation(task, Stage::QuizGenerating).await
    }

    /// Records or replaces the answer to one question.
    pub async fn record_answer(
        &self,
        question_id: u32,
        option_index: u8,
    ) -> Result<Session, SessionError> {
        let mut session = self.session.lock().await;
        let next = session.record_answer(question_id, option_index)?;
        *session = next.clone();

        tracing::debug!(session_id = %next.id(), question_id, option_index, "answer recorded");
        Ok(next)
    }

    /// Submits the quiz and waits for the roadmap.
    pub async fn submit_quiz(&self) -> Result<Session, SessionError> {
        self.submit_quiz_cancellable(&CancelSignal::never()).await
    }

    /// Scores the quiz and generates the roadmap.
    ///
    /// # Errors
    ///
    /// - `RequestInProgress` while a generation is in flight
    /// - `InvalidState` outside `QuizActive`
    /// - `IncompleteAnswers` unless every question has an answer
    pub async fn submit_quiz_cancellable(
        &self,
        cancel: &CancelSignal,
    ) -> Result<Session, SessionError> {
        let generating = {
            let mut session = self.session.lock().await;
            let next = session.submit_quiz()?;
            *session = next.clone();
            next
        };
        let stuck = || SessionError::invalid_state(generating.stage(), "synthesize a roadmap");
        let score = generating.score().ok_or_else(stuck)?.clone();
        let topic = generating.topic().ok_or_else(stuck)?.to_string();
        let weeks = generating.time_commitment();

        tracing::info!(
            session_id = %generating.id(),
            topic = %topic,
            correct = score.correct_count(),
            total = score.total_questions(),
            level = %score.level(),
            stage = %generating.stage(),
            "quiz submitted; generating roadmap"
        );

        let session = Arc::clone(&self.session);
        let synthesizer = Arc::clone(&self.synthesizer);
        let cancel = cancel.clone();
        let task = tokio::spawn(async move {
            let roadmap = synthesizer
                .synthesize_roadmap(&topic, &score, weeks, &cancel)
                .await;

            let mut session = session.lock().await;
            let next = session.roadmap_ready(roadmap.value, roadmap.diagnostic)?;
            *session = next.clone();

            tracing::info!(
                session_id = %next.id(),
                fallback = roadmap.origin != ContentOrigin::Generated,
                stage = %next.stage(),
                "roadmap ready"
            );
            Ok(next)
        });

        join_generation(task, Stage::RoadmapGenerating).await
    }

    /// Discards everything and starts a fresh session.
    pub async fn restart(&self) -> Result<Session, SessionError> {
        let mut session = self.session.lock().await;
        let previous = *session.id();
        let next = session.restart()?;
        *session = next.clone();

        tracing::info!(previous_session_id = %previous, session_id = %next.id(), "session restarted");
        Ok(next)
    }

    /// Plain-text report of the finished session.
    pub async fn report(&self) -> Result<String, SessionError> {
        let session = self.session.lock().await;
        ReportSerializer::to_report(&session)
    }

    /// Exports the finished session. Text is rendered in-process; other
    /// formats go through `renderer`.
    pub async fn export(
        &self,
        format: ExportFormat,
        renderer: &dyn DocumentRenderer,
    ) -> Result<ExportedDocument, ExportError> {
        let (request, topic, session_id) = {
            let session = self.session.lock().await;
            let report = ReportSerializer::to_report(&session)?;
            let invalid = || SessionError::invalid_state(session.stage(), "export the roadmap");
            let roadmap = session.roadmap().ok_or_else(invalid)?.clone();
            let score = session.score().ok_or_else(invalid)?.clone();
            let topic = roadmap.topic().to_string();
            (
                RenderRequest {
                    format,
                    roadmap,
                    score,
                    report,
                },
                topic,
                *session.id(),
            )
        };

        let document = match format {
            ExportFormat::Text => ExportedDocument::from_text(request.report, &topic),
            _ => {
                let bytes = renderer.render(&request).await.map_err(|error| {
                    tracing::warn!(%session_id, %format, %error, "document rendering failed");
                    error
                })?;
                ExportedDocument::new(bytes, format, &topic)
            }
        };

        tracing::info!(%session_id, %format, filename = %document.filename, "roadmap exported");
        Ok(document)
    }
}

/// Waits for a generation task. A panic in the task is re-raised here; a
/// task cancelled by runtime shutdown never stored its result.
async fn join_generation(
    task: JoinHandle<Result<Session, SessionError>>,
    stage: Stage,
) -> Result<Session, SessionError> {
    match task.await {
        Ok(result) => result,
        Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
        Err(error) => {
            tracing::error!(%error, %stage, "generation task did not complete");
            Err(SessionError::in_progress(stage))
        }
    }
}
