//! Country detection for checkout rendering.
//!
//! Used to preselect the customer's country in the billing form. The
//! lookup runs with a short timeout and degrades to the configured default
//! on any failure - it must never delay or block a render.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeoConfig;

#[derive(Deserialize)]
struct GeoResponse {
    country: String,
}

/// Client for the external country-detection service.
#[derive(Clone)]
pub struct GeoClient {
    client: reqwest::Client,
    endpoint: Option<String>,
    default_country: String,
}

impl GeoClient {
    /// Create a new geo client with the configured timeout baked into the
    /// underlying HTTP client.
    #[must_use]
    pub fn new(config: &GeoConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: config.endpoint.as_ref().map(|url| {
                url.as_str().trim_end_matches('/').to_string()
            }),
            default_country: config.default_country.clone(),
        }
    }

    /// Detect the country for `ip`, or fall back to the default.
    ///
    /// Timeouts, connectivity failures, and decode failures all degrade to
    /// the default country. No endpoint configured means no lookup at all.
    #[instrument(skip(self))]
    pub async fn detect(&self, ip: Option<&str>) -> String {
        let Some(endpoint) = &self.endpoint else {
            return self.default_country.clone();
        };

        let mut request = self.client.get(endpoint);
        if let Some(ip) = ip {
            request = request.query(&[("ip", ip)]);
        }

        match request.send().await {
            Ok(response) => match response.json::<GeoResponse>().await {
                Ok(geo) => geo.country,
                Err(e) => {
                    debug!(error = %e, "geo response decode failed, using default");
                    self.default_country.clone()
                }
            },
            Err(e) => {
                debug!(error = %e, "geo lookup failed, using default");
                self.default_country.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_detect_without_endpoint_uses_default() {
        let client = GeoClient::new(&GeoConfig {
            endpoint: None,
            timeout_ms: 100,
            default_country: "US".to_string(),
        });

        assert_eq!(client.detect(None).await, "US");
    }

    #[tokio::test]
    async fn test_detect_unreachable_endpoint_uses_default() {
        // Nothing listens on this port; the lookup must degrade, not error
        let client = GeoClient::new(&GeoConfig {
            endpoint: Some(url::Url::parse("http://127.0.0.1:1/geo").expect("valid url")),
            timeout_ms: 100,
            default_country: "DE".to_string(),
        });

        assert_eq!(client.detect(Some("203.0.113.9")).await, "DE");
    }
}
