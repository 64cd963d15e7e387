//! How many weeks the learner commits to.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Supported roadmap lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TimeCommitment {
    #[default]
    SixWeeks,
    TwelveWeeks,
}

impl TimeCommitment {
    pub fn weeks(&self) -> u32 {
        match self {
            TimeCommitment::SixWeeks => 6,
            TimeCommitment::TwelveWeeks => 12,
        }
    }
}

impl TryFrom<u32> for TimeCommitment {
    type Error = ValidationError;

    fn try_from(weeks: u32) -> Result<Self, Self::Error> {
        match weeks {
            6 => Ok(TimeCommitment::SixWeeks),
            12 => Ok(TimeCommitment::TwelveWeeks),
            other => Err(ValidationError::invalid_format(
                "weeks",
                format!("must be 6 or 12, got {}", other),
            )),
        }
    }
}

impl From<TimeCommitment> for u32 {
    fn from(commitment: TimeCommitment) -> Self {
        commitment.weeks()
    }
}

impl fmt::Display for TimeCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} weeks", self.weeks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_six_and_twelve() {
        assert_eq!(TimeCommitment::try_from(6).unwrap(), TimeCommitment::SixWeeks);
        assert_eq!(TimeCommitment::try_from(12).unwrap(), TimeCommitment::TwelveWeeks);
    }

    #[test]
    fn rejects_other_lengths() {
        for weeks in [0, 1, 7, 24] {
            assert!(TimeCommitment::try_from(weeks).is_err());
        }
    }

    #[test]
    fn serializes_as_week_count() {
        assert_eq!(serde_json::to_string(&TimeCommitment::TwelveWeeks).unwrap(), "12");
        let parsed: TimeCommitment = serde_json::from_str("6").unwrap();
        assert_eq!(parsed, TimeCommitment::SixWeeks);
    }
}
