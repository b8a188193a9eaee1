// ABOUTME: Shared application state for the roster HTTP server.
// ABOUTME: Holds the record store behind the RecordStore trait so any backend can be injected.

use std::sync::Arc;

use roster_store::RecordStore;

/// Shared state accessible by all Axum handlers. The store is the only
/// resource shared between requests.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}
