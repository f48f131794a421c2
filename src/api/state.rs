//! Application state for the Laytime Calculation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::ClaimStore;

/// Shared application state.
///
/// Holds the loaded terms presets and the claim store. The engine itself is
/// stateless and needs nothing from here.
#[derive(Clone)]
pub struct AppState {
    /// The loaded terms presets.
    config: Arc<ConfigLoader>,
    /// The tenant-scoped claim store.
    store: Arc<dyn ClaimStore>,
}

impl AppState {
    /// Creates a new application state from presets and a claim store.
    pub fn new(config: ConfigLoader, store: impl ClaimStore + 'static) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the claim store.
    pub fn store(&self) -> &dyn ClaimStore {
        self.store.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_send() {
        // Required for axum state
        fn assert_state<T: Clone + Send + Sync + 'static>() {}
        assert_state::<AppState>();
    }
}
