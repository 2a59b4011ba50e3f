//! Application state for the Ferie Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::registry::WorkerRegistry;
use crate::store::WorkerStore;

/// Shared application state.
///
/// Holds the worker registry, which in turn owns the store and the
/// loaded engine configuration.
#[derive(Clone)]
pub struct AppState {
    registry: WorkerRegistry,
}

impl AppState {
    /// Creates a new application state over a store and configuration.
    pub fn new(config: ConfigLoader, store: Arc<dyn WorkerStore>) -> Self {
        Self {
            registry: WorkerRegistry::new(store, Arc::new(config)),
        }
    }

    /// Returns the worker registry.
    pub fn registry(&self) -> &WorkerRegistry {
        &self.registry
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &ConfigLoader {
        self.registry.config()
    }
}
