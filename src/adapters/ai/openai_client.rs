//! OpenAI Client - GenerationClient for OpenAI's chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let client = OpenAIClient::new(config)?;
//! ```
//!
//! The prompt is sent as a single user message; the reply is the first
//! choice's message content.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::transport::{build_http_client, check_status, map_send_error};
use crate::ports::{
    GeneratedText, GenerationClient, GenerationRequest, ProviderInfo, TransportFailure,
};

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API client.
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIClient {
    /// Creates a new OpenAI client with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, TransportFailure> {
        let client = build_http_client(config.timeout)?;
        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &GenerationRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl GenerationClient for OpenAIClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, TransportFailure> {
        request.ensure_prompt()?;

        tracing::debug!(model = %self.config.model, "sending OpenAI chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&self.to_openai_request(&request))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout))?;

        let response = check_status(response).await?;
        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| TransportFailure::malformed(format!("Failed to parse response: {}", e)))?;

        let model = openai_response.model;
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TransportFailure::malformed("No choices in response"))?;

        Ok(GeneratedText::new(choice.message.content, model))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn request_is_single_user_message() {
        let client = OpenAIClient::new(OpenAIConfig::new("k")).unwrap();
        let request = GenerationRequest::new("Create a roadmap").with_temperature(0.2);
        let body = serde_json::to_value(client.to_openai_request(&request)).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Create a roadmap");
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn completions_url_is_built_from_base() {
        let client =
            OpenAIClient::new(OpenAIConfig::new("k").with_base_url("http://localhost:8080/v1/"))
                .unwrap();
        assert_eq!(client.completions_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_without_network() {
        let client = OpenAIClient::new(OpenAIConfig::new("k").with_base_url("http://127.0.0.1:9"))
            .unwrap();
        let result = client.generate(GenerationRequest::new("")).await;
        assert!(matches!(result, Err(TransportFailure::InvalidRequest(_))));
    }

    #[test]
    fn provider_info_names_openai() {
        let client = OpenAIClient::new(OpenAIConfig::new("k").with_model("gpt-4o")).unwrap();
        let info = client.provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o");
    }
}
