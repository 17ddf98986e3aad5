//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BuilderConfig;
use crate::store::{LocalCache, StoreClient, SyncedStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the synced store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BuilderConfig,
    store: SyncedStore,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: BuilderConfig) -> Self {
        let remote = StoreClient::new(&config.store);
        let local = LocalCache::new(config.offline_cache_dir.clone());
        let store = SyncedStore::new(remote, local);

        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the builder configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.inner.config
    }

    /// Get a reference to the synced store.
    #[must_use]
    pub fn store(&self) -> &SyncedStore {
        &self.inner.store
    }
}
