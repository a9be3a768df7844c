//! Application state for the HTTP server.

use crate::store::OpsStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Operations store holding the profile, mission log, and forecast.
    pub store: OpsStore,
}

impl AppState {
    /// Create a new application state around the given store.
    pub fn new(store: OpsStore) -> Self {
        Self { store }
    }
}
