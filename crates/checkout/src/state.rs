//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CheckoutConfig;
use crate::processor::ProcessorClient;
use crate::services::GeoClient;
use crate::store::PublicConfigClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the store client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CheckoutConfig,
    store: PublicConfigClient,
    processor: ProcessorClient,
    geo: GeoClient,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: CheckoutConfig) -> Self {
        let store = PublicConfigClient::new(&config.store);
        let processor = ProcessorClient::new(&config.processor);
        let geo = GeoClient::new(&config.geo);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                processor,
                geo,
            }),
        }
    }

    /// Get a reference to the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &CheckoutConfig {
        &self.inner.config
    }

    /// Get a reference to the public config client.
    #[must_use]
    pub fn store(&self) -> &PublicConfigClient {
        &self.inner.store
    }

    /// Get a reference to the payment processor client.
    #[must_use]
    pub fn processor(&self) -> &ProcessorClient {
        &self.inner.processor
    }

    /// Get a reference to the country detection client.
    #[must_use]
    pub fn geo(&self) -> &GeoClient {
        &self.inner.geo
    }
}
