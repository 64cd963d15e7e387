//! Document Renderer Adapters.
//!
//! - `UnavailableRenderer` - Text-only deployments; visual formats are refused
//! - `MockDocumentRenderer` - Fixed output and call recording for tests

mod mock_renderer;
mod unavailable_renderer;

pub use mock_renderer::MockDocumentRenderer;
pub use unavailable_renderer::UnavailableRenderer;
