//! Export Serializer - plain-text roadmap report.
//!
//! The output is byte-for-byte deterministic for a given session: weak
//! concepts come from an ordered set, steps are emitted in week order and
//! no timestamps are included.

use crate::domain::session::{Session, SessionError, Stage};

const TITLE_RULE: &str = "============================================";
const SECTION_RULE: &str = "----------------------------------------";

/// Renders finished sessions as text.
pub struct ReportSerializer;

impl ReportSerializer {
    /// Renders the report for a session in `Results`.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is in `Results` with a roadmap
    pub fn to_report(session: &Session) -> Result<String, SessionError> {
        let invalid = || SessionError::invalid_state(session.stage(), "export the roadmap");

        if session.stage() != Stage::Results {
            return Err(invalid());
        }
        let roadmap = session.roadmap().ok_or_else(invalid)?;
        let score = session.score().ok_or_else(invalid)?;

        let mut out = format!(
            "Learning Roadmap for {}\n{}\n\nSkill Level: {}\nScore: {} out of {}\n\n",
            roadmap.topic(),
            TITLE_RULE,
            roadmap.level(),
            score.correct_count(),
            score.total_questions()
        );

        if !score.weak_concepts().is_empty() {
            let focus: Vec<&str> = score.weak_concepts().iter().map(String::as_str).collect();
            out.push_str(&format!("Areas to focus on: {}\n\n", focus.join(", ")));
        }

        out.push_str(&format!(
            "Roadmap ({} weeks):\n{}\n\n",
            roadmap.weeks().weeks(),
            SECTION_RULE
        ));

        for step in roadmap.steps_by_week() {
            out.push_str(&format!("Week {}: {}\n", step.week, step.title));
            out.push_str(&format!("Description: {}\n", step.description));
            if !step.concepts.is_empty() {
                out.push_str(&format!("Key Concepts: {}\n", step.concepts.join(", ")));
            }
            if let Some(milestone) = &step.milestone {
                out.push_str(&format!("Milestone: {}\n", milestone));
            }
            out.push('\n');
        }

        Ok(out)
    }
}
