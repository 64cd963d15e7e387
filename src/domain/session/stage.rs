//! Workflow stages of an assessment session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where the session currently is in the topic → quiz → roadmap flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for the user to pick a topic.
    #[default]
    TopicInput,
    /// Quiz generation is in flight.
    QuizGenerating,
    /// Quiz is shown and answers are being collected.
    QuizActive,
    /// Answers are scored; roadmap generation is in flight.
    RoadmapGenerating,
    /// Roadmap is ready to view or export.
    Results,
}

impl Stage {
    /// True while a generation request is outstanding.
    pub fn is_generating(&self) -> bool {
        matches!(self, Stage::QuizGenerating | Stage::RoadmapGenerating)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::TopicInput => "topic_input",
            Stage::QuizGenerating => "quiz_generating",
            Stage::QuizActive => "quiz_active",
            Stage::RoadmapGenerating => "roadmap_generating",
            Stage::Results => "results",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for Stage {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (TopicInput, QuizGenerating)
                | (QuizGenerating, QuizActive)
                | (QuizActive, QuizActive)
                | (QuizActive, RoadmapGenerating)
                | (QuizActive, TopicInput)
                | (RoadmapGenerating, Results)
                | (Results, TopicInput)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Stage::*;
        match self {
            TopicInput => vec![QuizGenerating],
            QuizGenerating => vec![QuizActive],
            QuizActive => vec![QuizActive, RoadmapGenerating, TopicInput],
            RoadmapGenerating => vec![Results],
            Results => vec![TopicInput],
        }
    }
}
