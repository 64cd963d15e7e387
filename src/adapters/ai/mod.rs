//! Generation Client Adapters.
//!
//! Implementations of the GenerationClient port.
//!
//! ## Available Adapters
//!
//! - `GeminiClient` - Google Gemini `generateContent`
//! - `OpenAIClient` - OpenAI chat completions
//! - `OfflineClient` - Always unavailable; forces bundled fallback content
//! - `MockGenerationClient` - Configurable mock for testing

mod gemini_client;
mod mock_client;
mod offline_client;
mod openai_client;
mod transport;

pub use gemini_client::{GeminiClient, GeminiConfig};
pub use mock_client::{MockGenerationClient, MockResponse, DEFAULT_MOCK_TEXT};
pub use offline_client::OfflineClient;
pub use openai_client::{OpenAIClient, OpenAIConfig};
