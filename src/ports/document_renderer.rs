//! Document Renderer Port - PDF/image rendering collaborator.
//!
//! The plain-text report is produced in-process. Visual formats are handed
//! to an external renderer through this port, together with the data
//! needed to lay the document out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::assessment::ScoreResult;
use crate::domain::roadmap::Roadmap;
use crate::domain::session::SessionError;

/// Port for rendering a finished roadmap to a visual document.
///
/// # Contract
///
/// Implementations must:
/// - Return a complete artifact in the requested format
/// - Reject formats they cannot produce with `UnsupportedFormat`
/// - Report clear errors for rendering failures
///
/// # Usage
///
/// ```rust,ignore
/// let renderer: &dyn DocumentRenderer = get_renderer();
/// let pdf_bytes = renderer.render(&request).await?;
/// ```
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Render the request to bytes in `request.format`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if rendering fails.
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, ExportError>;
}

/// Everything a renderer needs to lay out one roadmap.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Target format.
    pub format: ExportFormat,
    /// The roadmap being exported.
    pub roadmap: Roadmap,
    /// Score the roadmap was built from.
    pub score: ScoreResult,
    /// The plain-text report for the same session.
    pub report: String,
}

/// Export formats supported by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Plain-text report (no renderer needed).
    Text,
    /// PDF document.
    Pdf,
    /// PNG image.
    Image,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Image => "image/png",
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Image => "png",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Image => write!(f, "image"),
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            "image" | "png" => Ok(ExportFormat::Image),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported document with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Suggested filename for download.
    pub filename: String,
    /// The format that was used.
    pub format: ExportFormat,
}

impl ExportedDocument {
    /// Create a document named after its topic, e.g. `Python-Learning-Roadmap.pdf`.
    pub fn new(content: Vec<u8>, format: ExportFormat, topic: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}-Learning-Roadmap.{}", topic, format.extension()),
            format,
        }
    }

    /// Create from the plain-text report.
    pub fn from_text(report: String, topic: &str) -> Self {
        Self::new(report.into_bytes(), ExportFormat::Text, topic)
    }
}

/// Errors that can occur during document export.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Session is not ready to export.
    #[error("Cannot export: {0}")]
    InvalidState(#[from] SessionError),

    /// Unsupported export format requested.
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// External renderer is not available.
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// Rendering failed.
    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

impl ExportError {
    /// Create a renderer unavailable error.
    pub fn renderer_unavailable(reason: impl Into<String>) -> Self {
        Self::RendererUnavailable(reason.into())
    }

    /// Create a rendering failure.
    pub fn render_failed(reason: impl Into<String>) -> Self {
        Self::RenderFailed(reason.into())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
