//! Fallback Catalog Port - Bundled substitute content.
//!
//! When generation or parsing fails, the synthesizer asks this port for
//! pre-validated content instead. Lookups are exact and case-sensitive;
//! the selection chain across levels and topics lives in the synthesizer.

use crate::domain::assessment::{ProficiencyLevel, Quiz};
use crate::domain::roadmap::{RoadmapStep, TimeCommitment};

/// Read-only source of static quizzes and roadmap steps.
pub trait FallbackCatalog: Send + Sync {
    /// Quiz bundled for exactly `topic`, if any.
    fn quiz(&self, topic: &str) -> Option<Quiz>;

    /// Roadmap steps bundled for exactly `(topic, level, weeks)`, if any.
    fn roadmap(
        &self,
        topic: &str,
        level: ProficiencyLevel,
        weeks: TimeCommitment,
    ) -> Option<Vec<RoadmapStep>>;
}
