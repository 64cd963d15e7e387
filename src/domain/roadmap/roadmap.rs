//! Roadmap value objects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::TimeCommitment;
use crate::domain::assessment::ProficiencyLevel;
use crate::domain::foundation::{Timestamp, ValidationError};

/// One week of the learning plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub week: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

impl RoadmapStep {
    /// Creates a step with the required fields; lists start empty.
    pub fn new(
        week: u32,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if week == 0 {
            return Err(ValidationError::out_of_range("week", 1, i64::from(u32::MAX), 0));
        }
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::empty_field("description"));
        }

        Ok(Self {
            week,
            title,
            description,
            concepts: Vec::new(),
            resources: Vec::new(),
            milestone: None,
        })
    }

    pub fn with_concepts<I, S>(mut self, concepts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concepts = concepts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_milestone(mut self, milestone: impl Into<String>) -> Self {
        self.milestone = Some(milestone.into());
        self
    }
}

/// A personalized learning plan produced for one completed assessment.
///
/// `steps` normally holds one entry per week, but fallback content may be
/// shorter; nothing downstream relies on the two matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    topic: String,
    level: ProficiencyLevel,
    weeks: TimeCommitment,
    steps: Vec<RoadmapStep>,
    weak_concepts: BTreeSet<String>,
    generated_at: Timestamp,
}

impl Roadmap {
    pub fn new(
        topic: impl Into<String>,
        level: ProficiencyLevel,
        weeks: TimeCommitment,
        steps: Vec<RoadmapStep>,
        weak_concepts: BTreeSet<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            level,
            weeks,
            steps,
            weak_concepts,
            generated_at: Timestamp::now(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn level(&self) -> ProficiencyLevel {
        self.level
    }

    pub fn weeks(&self) -> TimeCommitment {
        self.weeks
    }

    pub fn steps(&self) -> &[RoadmapStep] {
        &self.steps
    }

    /// Steps ordered by week; ties keep their original order.
    pub fn steps_by_week(&self) -> Vec<&RoadmapStep> {
        let mut ordered: Vec<&RoadmapStep> = self.steps.iter().collect();
        ordered.sort_by_key(|step| step.week);
        ordered
    }

    pub fn weak_concepts(&self) -> &BTreeSet<String> {
        &self.weak_concepts
    }

    pub fn generated_at(&self) -> &Timestamp {
        &self.generated_at
    }
}
