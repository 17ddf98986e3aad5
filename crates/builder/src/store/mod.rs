//! Draft/settings store access.
//!
//! The builder persists everything through an external key-value store
//! (`get(key)` / `put(key, value)` over HTTP JSON). [`SyncedStore`] wraps
//! the remote client with the session-wide offline fallback policy - the
//! rest of the crate only ever talks to `SyncedStore`, so the policy lives
//! in exactly one place.

mod local;
mod synced;

pub use local::LocalCache;
pub use synced::SyncedStore;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::instrument;

use launchpay_core::TenantId;

use crate::config::StoreApiConfig;

/// Errors from the store layer (remote or local cache).
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding/decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local cache I/O failed.
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store API returned a non-success status.
    #[error("Store API returned status {0}")]
    Status(u16),
}

impl StoreError {
    /// Whether this is a connectivity failure that should latch offline
    /// mode, as opposed to a logical error the caller must see.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

// =============================================================================
// Store Keys
// =============================================================================

/// Key for a tenant's checkout collection.
#[must_use]
pub fn checkouts_key(tenant: &TenantId) -> String {
    format!("{tenant}:checkouts")
}

/// Key for a tenant's settings singleton.
#[must_use]
pub fn settings_key(tenant: &TenantId) -> String {
    format!("{tenant}:settings")
}

/// Key for a tenant's coupon catalog.
#[must_use]
pub fn coupons_key(tenant: &TenantId) -> String {
    format!("{tenant}:coupons")
}

// =============================================================================
// StoreClient
// =============================================================================

/// Client for the external key-value store API.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl StoreClient {
    /// Create a new store client.
    #[must_use]
    pub fn new(config: &StoreApiConfig) -> Self {
        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                token: config.token.expose_secret().to_string(),
            }),
        }
    }

    /// Fetch the value stored under `key`; `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on connectivity, status, or decode failures.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let url = format!("{}/kv/{key}", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        Ok(Some(response.json::<T>().await?))
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on connectivity or status failures.
    #[instrument(skip(self, value))]
    pub async fn put<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let url = format!("{}/kv/{key}", self.inner.base_url);
        let response = self
            .inner
            .client
            .put(&url)
            .bearer_auth(&self.inner.token)
            .json(value)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Status(status.as_u16()))
        }
    }

    /// Check that the store API is reachable.
    ///
    /// # Errors
    ///
    /// Returns the underlying HTTP error; used by the readiness probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let url = format!("{}/health", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Status(response.status().as_u16()))
        }
    }
}
