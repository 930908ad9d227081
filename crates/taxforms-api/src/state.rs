//! # Application State
//!
//! Shared state for the Axum application: the workflow service over its
//! record store.

use std::sync::Arc;

use taxforms_workflow::{MemoryStore, TaxFormService};

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<TaxFormService<MemoryStore>>,
}

impl AppState {
    /// Create application state backed by an empty in-memory store.
    pub fn new() -> Self {
        Self {
            service: Arc::new(TaxFormService::new(MemoryStore::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
