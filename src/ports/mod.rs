//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationClient` - Text-generation backend (Gemini, OpenAI, offline)
//! - `FallbackCatalog` - Bundled quizzes and roadmaps used when generation fails
//! - `DocumentRenderer` - PDF/image rendering collaborator

mod document_renderer;
mod fallback_catalog;
mod generation_client;

pub use document_renderer::{
    DocumentRenderer, ExportError, ExportFormat, ExportedDocument, RenderRequest,
};
pub use fallback_catalog::FallbackCatalog;
pub use generation_client::{
    GeneratedText, GenerationClient, GenerationRequest, ProviderInfo, TransportFailure,
};
