//! Mock document renderer for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{DocumentRenderer, ExportError, ExportFormat, RenderRequest};

/// Renderer that returns fixed bytes, or a fixed error, and records the
/// formats it was asked for.
#[derive(Debug, Clone)]
pub struct MockDocumentRenderer {
    outcome: Result<Vec<u8>, ExportError>,
    calls: Arc<Mutex<Vec<ExportFormat>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDocumentRenderer {
    /// Renders every request to `bytes`.
    pub fn returning(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            outcome: Ok(bytes.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every request with `error`.
    pub fn failing(error: ExportError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<ExportFormat> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl DocumentRenderer for MockDocumentRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, ExportError> {
        lock(&self.calls).push(request.format);
        self.outcome.clone()
    }
}
