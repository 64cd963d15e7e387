//! Assessment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Assessment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// Questions requested per generated quiz
    #[serde(default = "default_question_count")]
    pub question_count: usize,

    /// Time commitment offered when the user does not pick one
    #[serde(default = "default_weeks")]
    pub default_weeks: u32,
}

impl AssessmentConfig {
    pub const MAX_QUESTIONS: usize = 20;

    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question_count == 0 || self.question_count > Self::MAX_QUESTIONS {
            return Err(ValidationError::InvalidQuestionCount);
        }
        if self.default_weeks != 6 && self.default_weeks != 12 {
            return Err(ValidationError::InvalidDefaultWeeks);
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            default_weeks: default_weeks(),
        }
    }
}

fn default_question_count() -> usize {
    5
}

fn default_weeks() -> u32 {
    6
}
