//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generation clients (Gemini, OpenAI, offline, mock)
//! - `fallback` - Bundled fallback content
//! - `document` - Document renderers

pub mod ai;
pub mod document;
pub mod fallback;

pub use ai::{
    GeminiClient, GeminiConfig, MockGenerationClient, OfflineClient, OpenAIClient, OpenAIConfig,
};
pub use document::{MockDocumentRenderer, UnavailableRenderer};
pub use fallback::{StaticFallbackCatalog, DEFAULT_FALLBACK_TOPIC};
