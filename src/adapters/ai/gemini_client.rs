//! Gemini Client - GenerationClient for Google's Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.0-flash")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let client = GeminiClient::new(config)?;
//! ```
//!
//! One `generateContent` call per request; the generated text is read from
//! `candidates[0].content.parts[0].text`.

use async_trait::async_trait;
use reqwest::{Client, Request};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::transport::{build_http_client, check_status, map_send_error};
use crate::ports::{
    GeneratedText, GenerationClient, GenerationRequest, ProviderInfo, TransportFailure,
};

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent in the `x-goog-api-key` header.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.0-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";

    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Creates a client with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, TransportFailure> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Endpoint URL without the key parameter.
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Builds the HTTP request. The key travels in a header so it never
    /// appears in a URL.
    fn build_request(&self, request: &GenerationRequest) -> Result<Request, TransportFailure> {
        self.client
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key())
            .json(&Self::to_gemini_request(request))
            .build()
            .map_err(|e| TransportFailure::invalid_request(e.without_url().to_string()))
    }

    fn to_gemini_request(request: &GenerationRequest) -> GeminiRequest {
        let generation_config = if request.max_output_tokens.is_some() || request.temperature.is_some() {
            Some(GeminiGenerationConfig {
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            })
        } else {
            None
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config,
        }
    }
}

/// Pulls the first candidate's first text part out of a response envelope.
fn extract_text(response: GeminiResponse) -> Result<String, TransportFailure> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| TransportFailure::malformed("no candidate text in response"))
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, TransportFailure> {
        request.ensure_prompt()?;

        tracing::debug!(model = %self.config.model, "sending Gemini generateContent request");

        let response = self
            .client
            .execute(self.build_request(&request)?)
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;

        let response = check_status(response).await?;
        let envelope: GeminiResponse = response
            .json()
            .await
            .map_err(|e| TransportFailure::malformed(format!("Failed to decode response: {}", e)))?;

        let text = extract_text(envelope)?;
        Ok(GeneratedText::new(text, self.config.model.clone()))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", &self.config.model)
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}
