//! Shared application state

use std::sync::Arc;

use upstream_config::ResourcesConfig;
use upstream_core::{DelayDirective, DelayPlan, DelaySimulator, ResourceStore};

/// State handed to every handler
///
/// The store is built once and never mutated, so it is shared without locks.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub store: Arc<ResourceStore>,
    pub simulator: DelaySimulator,
    pub default_limit: usize,
}

impl AppContext {
    pub fn new(store: ResourceStore, simulator: DelaySimulator, default_limit: usize) -> Self {
        Self {
            store: Arc::new(store),
            simulator,
            default_limit,
        }
    }

    /// Seed the store and capture the server start time
    pub fn from_config(config: &ResourcesConfig) -> Self {
        let store = ResourceStore::seed_with_name_length(config.seed_count, config.name_length);
        tracing::debug!("Seeded {} resources", store.len());

        Self::new(store, DelaySimulator::started_now(), config.default_limit)
    }

    /// Suspend the request for whatever the directive asks for
    pub async fn delay(&self, directive: &DelayDirective) -> DelayPlan {
        self.simulator.apply(directive).await
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::from_config(&ResourcesConfig::default())
    }
}
