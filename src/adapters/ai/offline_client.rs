//! Offline Client - a GenerationClient with no backend.
//!
//! Every call fails with `Unavailable`, so the synthesizer always serves
//! bundled fallback content. Selected when no API key is configured.

use async_trait::async_trait;

use crate::ports::{
    GeneratedText, GenerationClient, GenerationRequest, ProviderInfo, TransportFailure,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClient;

impl OfflineClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerationClient for OfflineClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GeneratedText, TransportFailure> {
        request.ensure_prompt()?;
        Err(TransportFailure::unavailable("offline mode: no generation backend configured"))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("offline", "none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_unavailable() {
        let result = OfflineClient::new().generate(GenerationRequest::new("quiz")).await;
        assert!(matches!(result, Err(TransportFailure::Unavailable { .. })));
    }

    #[tokio::test]
    async fn blank_prompt_is_still_invalid_request() {
        let result = OfflineClient::new().generate(GenerationRequest::new("")).await;
        assert!(matches!(result, Err(TransportFailure::InvalidRequest(_))));
    }
}
