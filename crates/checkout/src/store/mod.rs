//! Public checkout config client.
//!
//! The renderer never talks to the draft store directly - it consumes the
//! store's public config endpoint (`GET /public-config/{checkout_id}`),
//! which bundles the published checkout with the tenant's gateway flags and
//! the card publishable key. Responses are cached with `moka` (5-minute
//! TTL) keyed by checkout id.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use launchpay_core::{CheckoutId, CheckoutPage, Coupon, GatewayFlags};

use crate::config::StoreApiConfig;

/// Errors that can occur when fetching public checkout configs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Checkout not found or not published.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Store API returned a non-success status.
    #[error("Store API returned status {0}")]
    Status(u16),
}

/// Everything the renderer needs to draw one checkout.
///
/// The coupon catalog rides along for server-side evaluation only; it is
/// never forwarded to the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicConfig {
    pub checkout: CheckoutPage,
    #[serde(default)]
    pub gateways: GatewayFlags,
    #[serde(default)]
    pub coupons: Vec<Coupon>,
    /// Card publishable key, safe to hand to the payment widget.
    #[serde(default)]
    pub card_publishable_key: Option<String>,
}

/// Client for the store's public config endpoint.
///
/// Configs are cached for 5 minutes, so a gateway disabled in the
/// dashboard disappears from renders within the TTL.
#[derive(Clone)]
pub struct PublicConfigClient {
    inner: Arc<PublicConfigClientInner>,
}

struct PublicConfigClientInner {
    client: reqwest::Client,
    base_url: String,
    token: String,
    cache: Cache<String, PublicConfig>,
}

impl PublicConfigClient {
    /// Create a new public config client.
    #[must_use]
    pub fn new(config: &StoreApiConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(PublicConfigClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                token: config.token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Fetch the public config for a checkout, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown ids and `StoreError`
    /// variants for connectivity or decode failures.
    #[instrument(skip(self))]
    pub async fn get_public_config(&self, id: &CheckoutId) -> Result<PublicConfig, StoreError> {
        let key = id.as_str().to_string();
        if let Some(cached) = self.inner.cache.get(&key).await {
            debug!(checkout_id = %id, "public config cache hit");
            return Ok(cached);
        }

        let config = self.fetch_public_config(id).await?;
        self.inner.cache.insert(key, config.clone()).await;
        Ok(config)
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

    async fn fetch_public_config(&self, id: &CheckoutId) -> Result<PublicConfig, StoreError> {
        let url = format!("{}/public-config/{}", self.inner.base_url, id);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(&self.inner.token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id.as_str().to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Store API returned non-success status"
            );
            return Err(StoreError::Status(status.as_u16()));
        }

        match serde_json::from_str(&response_text) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse public config response"
                );
                Err(StoreError::Parse(e))
            }
        }
    }
}
