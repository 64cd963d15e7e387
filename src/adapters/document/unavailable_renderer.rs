//! Renderer for deployments without a PDF/image backend.

use async_trait::async_trait;

use crate::ports::{DocumentRenderer, ExportError, RenderRequest};

/// Fails every request with `RendererUnavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRenderer;

#[async_trait]
impl DocumentRenderer for UnavailableRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, ExportError> {
        Err(ExportError::renderer_unavailable(format!(
            "no renderer configured for {} export",
            request.format
        )))
    }
}
