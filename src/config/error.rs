//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout (must be 1-600 seconds)")]
    InvalidTimeout,

    #[error("Invalid temperature (must be 0.0-2.0)")]
    InvalidTemperature,

    #[error("Invalid base URL (must start with http:// or https://)")]
    InvalidBaseUrl,

    #[error("Invalid question count (must be 1-20)")]
    InvalidQuestionCount,

    #[error("Invalid default weeks (must be 6 or 12)")]
    InvalidDefaultWeeks,

    #[error("Invalid log filter directive")]
    InvalidLogFilter,
}
