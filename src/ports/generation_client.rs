//! Generation Client Port - Interface for text-generation backends.
//!
//! This port abstracts the single round trip the assessment workflow makes to
//! a generative backend: one natural-language prompt in, one opaque block of
//! text out. Parsing the text is not the client's concern.
//!
//! # Design
//!
//! - One non-streaming call per generation attempt
//! - Clients never retry; fallback policy belongs to the caller
//! - Transport failures are typed so callers can log and classify them
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoClient;
//!
//! #[async_trait]
//! impl GenerationClient for EchoClient {
//!     async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, TransportFailure> {
//!         Ok(GeneratedText::new(request.prompt, "echo"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("echo", "echo")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for text-generation backends.
///
/// Implementations connect to an external service (Gemini, OpenAI, ...) and
/// translate between its wire format and [`GenerationRequest`] /
/// [`GeneratedText`].
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Sends one prompt and returns the raw generated text.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the prompt is empty or whitespace
    /// - Any other `TransportFailure` when the call cannot be completed or
    ///   the backend reports a non-success status
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, TransportFailure>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fully formed natural-language instruction.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Creates a request for the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Rejects prompts with no content before any network call is made.
    pub fn ensure_prompt(&self) -> Result<(), TransportFailure> {
        if self.prompt.trim().is_empty() {
            return Err(TransportFailure::invalid_request("prompt must not be empty"));
        }
        Ok(())
    }
}

/// Raw text returned by a backend, unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

impl GeneratedText {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "openai").
    pub name: String,
    /// Model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Failures of the generation round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Response body did not have the expected envelope shape.
    #[error("malformed response envelope: {0}")]
    MalformedEnvelope(String),

    /// Caller cancelled the request.
    #[error("generation cancelled")]
    Cancelled,
}

impl TransportFailure {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedEnvelope(message.into())
    }

    /// Returns true if a later attempt could plausibly succeed.
    ///
    /// Clients never act on this themselves; it only feeds diagnostics.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TransportFailure::RateLimited { .. }
                | TransportFailure::Unavailable { .. }
                | TransportFailure::Network(_)
                | TransportFailure::Timeout { .. }
        )
    }
}
