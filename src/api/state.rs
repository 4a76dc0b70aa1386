//! Application state for the ranking API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{InMemoryStore, ShiftStore};

/// Shared application state.
///
/// Holds the loaded configuration and the shift store handed to every handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn ShiftStore>,
}

impl AppState {
    /// Creates a new application state over the given store.
    pub fn new(config: ConfigLoader, store: Arc<dyn ShiftStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Creates a state backed by a fresh [`InMemoryStore`].
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(InMemoryStore::new()))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a shared handle to the shift store.
    pub fn store(&self) -> Arc<dyn ShiftStore> {
        Arc::clone(&self.store)
    }
}
