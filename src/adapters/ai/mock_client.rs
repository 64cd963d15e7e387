//! Mock Generation Client for testing.
//!
//! Provides a configurable mock implementation of the GenerationClient
//! port, allowing tests to run without calling real generation APIs.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated delays for cancellation and concurrency testing
//! - Failure injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let client = MockGenerationClient::new()
//!     .with_response(r#"[{"question": "..."}]"#)
//!     .with_failure(TransportFailure::unavailable("down"))
//!     .with_delay(Duration::from_millis(100));
//!
//! let text = client.generate(GenerationRequest::new("prompt")).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    GeneratedText, GenerationClient, GenerationRequest, ProviderInfo, TransportFailure,
};

/// Text returned once the scripted queue is exhausted.
pub const DEFAULT_MOCK_TEXT: &str = "Mock response";

/// Mock generation client for testing.
///
/// Clones share the response queue and call history.
#[derive(Debug, Clone)]
pub struct MockGenerationClient {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return generated text.
    Text(String),
    /// Return a transport failure.
    Failure(TransportFailure),
}

/// Locks a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationClient {
    /// Creates a new mock client with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(MockResponse::Text(content.into()));
        self
    }

    /// Adds a failure to the queue.
    pub fn with_failure(self, failure: TransportFailure) -> Self {
        lock(&self.responses).push_back(MockResponse::Failure(failure));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the provider info.
    pub fn with_provider_info(mut self, info: ProviderInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    /// Gets the next response or the default text.
    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Text(DEFAULT_MOCK_TEXT.to_string()))
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, TransportFailure> {
        request.ensure_prompt()?;
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Text(content) => Ok(GeneratedText::new(content, self.info.model.clone())),
            MockResponse::Failure(failure) => Err(failure),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
