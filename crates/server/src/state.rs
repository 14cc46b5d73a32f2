use std::sync::Arc;

use ludex_core::{Config, SearchCoordinator};

/// Shared application state
pub struct AppState {
    config: Config,
    coordinator: Arc<SearchCoordinator>,
}

impl AppState {
    pub fn new(config: Config, coordinator: Arc<SearchCoordinator>) -> Self {
        Self {
            config,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &SearchCoordinator {
        self.coordinator.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
