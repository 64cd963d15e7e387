//! Roadmap Synthesizer - generation with a fallback that never blocks.
//!
//! Both operations build a prompt, call the [`GenerationClient`], and parse
//! the reply. Any transport or parse failure is absorbed here and replaced
//! with bundled content from the [`FallbackCatalog`], so callers always get
//! a usable value plus an optional diagnostic.

mod prompts;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::CancelSignal;
use crate::domain::assessment::{ProficiencyLevel, Quiz, ScoreResult};
use crate::domain::generation::{parse_quiz, parse_roadmap, ParseError};
use crate::domain::roadmap::{Roadmap, RoadmapStep, TimeCommitment};
use crate::ports::{FallbackCatalog, GenerationClient, GenerationRequest, TransportFailure};

pub use prompts::{quiz_prompt, roadmap_prompt};

/// Where a synthesized value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Parsed from the generation backend's reply.
    Generated,
    /// Bundled content for the requested topic.
    Fallback,
    /// Bundled content for the default topic, standing in for the requested one.
    GenericFallback,
}

/// A value plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Synthesized<T> {
    pub value: T,
    pub origin: ContentOrigin,
    /// Why the value is not generated content; `None` when it is.
    pub diagnostic: Option<String>,
}

impl<T> Synthesized<T> {
    fn generated(value: T) -> Self {
        Self {
            value,
            origin: ContentOrigin::Generated,
            diagnostic: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin != ContentOrigin::Generated
    }
}

/// Result of one generation attempt.
#[derive(Debug)]
enum GenerationOutcome<T> {
    Generated(T),
    TransportFailure(TransportFailure),
    ParseError(ParseError),
}

/// Tunables passed through to every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizerSettings {
    /// Number of questions requested per quiz.
    pub question_count: usize,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// Topic whose bundled content substitutes for topics without any.
    pub default_topic: String,
}

impl Default for SynthesizerSettings {
    fn default() -> Self {
        Self {
            question_count: 5,
            max_output_tokens: None,
            temperature: None,
            default_topic: "Python".to_string(),
        }
    }
}

/// The catalog cannot back the never-fail guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesizerError {
    #[error("fallback catalog has no quiz for default topic '{0}'")]
    MissingDefaultQuiz(String),

    #[error("fallback catalog has no {weeks} roadmap for default topic '{topic}'")]
    MissingDefaultRoadmap { topic: String, weeks: TimeCommitment },
}

/// Produces quizzes and roadmaps, falling back to bundled content.
pub struct RoadmapSynthesizer {
    client: Arc<dyn GenerationClient>,
    catalog: Arc<dyn FallbackCatalog>,
    settings: SynthesizerSettings,
    // ─── Last-resort content, resolved once at construction ───
    backstop_quiz: Quiz,
    backstop_roadmaps: HashMap<TimeCommitment, Vec<RoadmapStep>>,
}

impl RoadmapSynthesizer {
    /// Creates a synthesizer.
    ///
    /// # Errors
    ///
    /// Fails if the catalog lacks a quiz, or a roadmap for either time
    /// commitment, under `settings.default_topic`.
    pub fn new(
        client: Arc<dyn GenerationClient>,
        catalog: Arc<dyn FallbackCatalog>,
        settings: SynthesizerSettings,
    ) -> Result<Self, SynthesizerError> {
        let default_topic = settings.default_topic.as_str();

        let backstop_quiz = catalog
            .quiz(default_topic)
            .ok_or_else(|| SynthesizerError::MissingDefaultQuiz(default_topic.to_string()))?;

        let mut backstop_roadmaps = HashMap::new();
        for weeks in [TimeCommitment::SixWeeks, TimeCommitment::TwelveWeeks] {
            let steps = roadmap_chain(catalog.as_ref(), default_topic, ProficiencyLevel::Intermediate, weeks)
                .ok_or_else(|| SynthesizerError::MissingDefaultRoadmap {
                    topic: default_topic.to_string(),
                    weeks,
                })?;
            backstop_roadmaps.insert(weeks, steps);
        }

        Ok(Self {
            client,
            catalog,
            settings,
            backstop_quiz,
            backstop_roadmaps,
        })
    }

    pub fn settings(&self) -> &SynthesizerSettings {
        &self.settings
    }

    /// Generates a quiz for `topic`, or substitutes bundled content.
    pub async fn synthesize_quiz(&self, topic: &str, cancel: &CancelSignal) -> Synthesized<Quiz> {
        let prompt = quiz_prompt(topic, self.settings.question_count);

        let failure = match self.attempt(prompt, cancel, parse_quiz).await {
            GenerationOutcome::Generated(quiz) => {
                tracing::info!(topic, questions = quiz.len(), "quiz generated");
                return Synthesized::generated(quiz);
            }
            GenerationOutcome::TransportFailure(failure) => failure.to_string(),
            GenerationOutcome::ParseError(error) => error.to_string(),
        };

        let (quiz, origin) = match self.catalog.quiz(topic) {
            Some(quiz) => (quiz, ContentOrigin::Fallback),
            None => (self.backstop_quiz.clone(), ContentOrigin::GenericFallback),
        };
        let diagnostic = self.describe_fallback("quiz", topic, &failure, origin);

        tracing::warn!(topic, error = %failure, ?origin, "quiz generation failed; using fallback");
        Synthesized {
            value: quiz,
            origin,
            diagnostic: Some(diagnostic),
        }
    }

    /// Generates a roadmap for `topic` tailored to `score`, or substitutes
    /// bundled steps. The roadmap always carries the requested topic, the
    /// level computed from `score`, and `weeks`.
    pub async fn synthesize_roadmap(
        &self,
        topic: &str,
        score: &ScoreResult,
        weeks: TimeCommitment,
        cancel: &CancelSignal,
    ) -> Synthesized<Roadmap> {
        let level = score.level();
        let build = |steps| Roadmap::new(topic, level, weeks, steps, score.weak_concepts().clone());
        let prompt = roadmap_prompt(topic, score, weeks);

        let failure = match self.attempt(prompt, cancel, parse_roadmap).await {
            GenerationOutcome::Generated(steps) => {
                if steps.len() != weeks.weeks() as usize {
                    tracing::debug!(topic, steps = steps.len(), weeks = weeks.weeks(), "roadmap step count differs from weeks");
                }
                tracing::info!(topic, %level, "roadmap generated");
                return Synthesized::generated(build(steps));
            }
            GenerationOutcome::TransportFailure(failure) => failure.to_string(),
            GenerationOutcome::ParseError(error) => error.to_string(),
        };

        let (steps, origin) = match roadmap_chain(self.catalog.as_ref(), topic, level, weeks) {
            Some(steps) => (steps, ContentOrigin::Fallback),
            None => (self.generic_roadmap(level, weeks), ContentOrigin::GenericFallback),
        };
        let diagnostic = self.describe_fallback("roadmap", topic, &failure, origin);

        tracing::warn!(topic, %level, error = %failure, ?origin, "roadmap generation failed; using fallback");
        Synthesized {
            value: build(steps),
            origin,
            diagnostic: Some(diagnostic),
        }
    }

    /// One round trip, raced against `cancel`.
    async fn attempt<T>(
        &self,
        prompt: String,
        cancel: &CancelSignal,
        parse: fn(&str) -> Result<T, ParseError>,
    ) -> GenerationOutcome<T> {
        let mut request = GenerationRequest::new(prompt);
        if let Some(max) = self.settings.max_output_tokens {
            request = request.with_max_output_tokens(max);
        }
        if let Some(temp) = self.settings.temperature {
            request = request.with_temperature(temp);
        }

        let provider = self.client.provider_info();
        tracing::debug!(provider = %provider.name, model = %provider.model, "requesting generation");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportFailure::Cancelled),
            result = self.client.generate(request) => result,
        };

        match result {
            Ok(text) => match parse(&text.content) {
                Ok(value) => GenerationOutcome::Generated(value),
                Err(error) => GenerationOutcome::ParseError(error),
            },
            Err(failure) => GenerationOutcome::TransportFailure(failure),
        }
    }

    fn generic_roadmap(&self, level: ProficiencyLevel, weeks: TimeCommitment) -> Vec<RoadmapStep> {
        self.catalog
            .roadmap(&self.settings.default_topic, level, weeks)
            .or_else(|| self.backstop_roadmaps.get(&weeks).cloned())
            .unwrap_or_default()
    }

    fn describe_fallback(&self, what: &str, topic: &str, failure: &str, origin: ContentOrigin) -> String {
        match origin {
            ContentOrigin::GenericFallback => format!(
                "{} generation failed ({}); no bundled {} for '{}', substituted '{}' content",
                what, failure, what, topic, self.settings.default_topic
            ),
            _ => format!("{} generation failed ({}); using bundled content", what, failure),
        }
    }
}

/// Exact level, then Intermediate, then any level, all for one topic.
fn roadmap_chain(
    catalog: &dyn FallbackCatalog,
    topic: &str,
    level: ProficiencyLevel,
    weeks: TimeCommitment,
) -> Option<Vec<RoadmapStep>> {
    catalog
        .roadmap(topic, level, weeks)
        .or_else(|| catalog.roadmap(topic, ProficiencyLevel::Intermediate, weeks))
        .or_else(|| {
            ProficiencyLevel::ALL
                .iter()
                .find_map(|other| catalog.roadmap(topic, *other, weeks))
        })
}
