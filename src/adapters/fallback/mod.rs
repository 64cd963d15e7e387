//! Fallback Catalog Adapters.
//!
//! - `StaticFallbackCatalog` - Content compiled into the binary

mod static_catalog;

pub use static_catalog::{StaticFallbackCatalog, DEFAULT_FALLBACK_TOPIC};
