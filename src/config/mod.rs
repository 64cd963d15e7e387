//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SKILL_ROADMAP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use skill_roadmap::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Generating with {:?}", config.generation.provider);
//! ```

mod assessment;
mod error;
mod generation;
mod telemetry;

pub use assessment::AssessmentConfig;
pub use error::{ConfigError, ValidationError};
pub use generation::{GenerationConfig, GenerationProvider};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads successfully;
/// [`AppConfig::validate()`] then reports what is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation backend (Gemini/OpenAI/offline)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Quiz and roadmap settings
    #[serde(default)]
    pub assessment: AssessmentConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SKILL_ROADMAP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SKILL_ROADMAP__GENERATION__PROVIDER=openai` -> `generation.provider = openai`
    /// - `SKILL_ROADMAP__ASSESSMENT__QUESTION_COUNT=8` -> `assessment.question_count = 8`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SKILL_ROADMAP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generation.validate()?;
        self.assessment.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
