//! Write-through store with the session-wide offline fallback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

use launchpay_core::{CheckoutPage, Coupon, StoreSettings, TenantId};

use super::{LocalCache, StoreClient, StoreError, checkouts_key, coupons_key, settings_key};

/// Remote store wrapped with the offline fallback policy.
///
/// Every write goes to the remote first and is mirrored into the local
/// cache on success. The first connectivity failure latches the session
/// into offline mode: from then on, reads and writes use only the local
/// cache, with no network retries. There is no reconciliation back to the
/// remote - recovery is a fresh session.
#[derive(Clone)]
pub struct SyncedStore {
    inner: Arc<SyncedStoreInner>,
}

struct SyncedStoreInner {
    remote: StoreClient,
    local: LocalCache,
    offline: AtomicBool,
}

impl SyncedStore {
    /// Create a synced store over a remote client and a local cache.
    #[must_use]
    pub fn new(remote: StoreClient, local: LocalCache) -> Self {
        Self {
            inner: Arc::new(SyncedStoreInner {
                remote,
                local,
                offline: AtomicBool::new(false),
            }),
        }
    }

    /// Whether this session has latched into offline mode.
    #[must_use]
    pub fn is_offline(&self) -> bool {
        self.inner.offline.load(Ordering::Relaxed)
    }

    fn latch_offline(&self, err: &StoreError) {
        if !self.inner.offline.swap(true, Ordering::Relaxed) {
            warn!(
                error = %err,
                "store unreachable; entering offline mode for the rest of this session"
            );
        }
    }

    /// Read the value under `key`, falling back to the local cache when
    /// the remote is unreachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for non-connectivity failures (bad status,
    /// decode, cache I/O).
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        if self.is_offline() {
            return self.inner.local.read(key).await;
        }

        match self.inner.remote.get(key).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_connectivity() => {
                self.latch_offline(&err);
                self.inner.local.read(key).await
            }
            Err(err) => Err(err),
        }
    }

    /// Write `value` under `key`, falling back to the local cache when
    /// the remote is unreachable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for non-connectivity failures.
    #[instrument(skip(self, value))]
    pub async fn put<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        if self.is_offline() {
            return self.inner.local.write(key, value).await;
        }

        match self.inner.remote.put(key, value).await {
            Ok(()) => {
                // Mirror so offline reads see the latest accepted write
                if let Err(err) = self.inner.local.write(key, value).await {
                    warn!(error = %err, "failed to mirror write to local cache");
                }
                Ok(())
            }
            Err(err) if err.is_connectivity() => {
                self.latch_offline(&err);
                self.inner.local.write(key, value).await
            }
            Err(err) => Err(err),
        }
    }

    /// Check remote reachability without latching offline mode.
    ///
    /// # Errors
    ///
    /// Returns the underlying error; used by the readiness probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.inner.remote.ping().await
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// Load a tenant's checkout collection (empty if never saved).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on non-connectivity failures.
    pub async fn load_checkouts(&self, tenant: &TenantId) -> Result<Vec<CheckoutPage>, StoreError> {
        Ok(self.get(&checkouts_key(tenant)).await?.unwrap_or_default())
    }

    /// Persist a tenant's checkout collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on non-connectivity failures.
    pub async fn save_checkouts(
        &self,
        tenant: &TenantId,
        checkouts: &[CheckoutPage],
    ) -> Result<(), StoreError> {
        self.put(&checkouts_key(tenant), &checkouts).await
    }

    /// Load a tenant's settings singleton, if it exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on non-connectivity failures.
    pub async fn load_settings(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<StoreSettings>, StoreError> {
        self.get(&settings_key(tenant)).await
    }

    /// Persist a tenant's settings singleton.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on non-connectivity failures.
    pub async fn save_settings(
        &self,
        tenant: &TenantId,
        settings: &StoreSettings,
    ) -> Result<(), StoreError> {
        self.put(&settings_key(tenant), settings).await
    }

    /// Load a tenant's coupon catalog (empty if never saved).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on non-connectivity failures.
    pub async fn load_coupons(&self, tenant: &TenantId) -> Result<Vec<Coupon>, StoreError> {
        Ok(self.get(&coupons_key(tenant)).await?.unwrap_or_default())
    }

    /// Persist a tenant's coupon catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on non-connectivity failures.
    pub async fn save_coupons(
        &self,
        tenant: &TenantId,
        coupons: &[Coupon],
    ) -> Result<(), StoreError> {
        self.put(&coupons_key(tenant), &coupons).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreApiConfig;
    use secrecy::SecretString;

    /// A store client pointed at a port nothing listens on.
    fn unreachable_remote() -> StoreClient {
        StoreClient::new(&StoreApiConfig {
            base_url: url::Url::parse("http://127.0.0.1:1").expect("valid url"),
            token: SecretString::from("irrelevant"),
        })
    }

    fn scratch_store() -> SyncedStore {
        let dir = std::env::temp_dir().join(format!(
            "launchpay-synced-test-{}",
            uuid::Uuid::new_v4().simple()
        ));
        SyncedStore::new(unreachable_remote(), LocalCache::new(dir))
    }

    #[tokio::test]
    async fn test_failed_write_latches_offline_and_lands_locally() {
        let store = scratch_store();
        assert!(!store.is_offline());

        store
            .put("tnt_x:checkouts", &vec!["draft".to_string()])
            .await
            .expect("falls back to local cache");

        assert!(store.is_offline());

        // Subsequent reads serve the locally cached write
        let value: Option<Vec<String>> = store.get("tnt_x:checkouts").await.expect("read");
        assert_eq!(value, Some(vec!["draft".to_string()]));
    }

    #[tokio::test]
    async fn test_offline_mode_persists_for_the_session() {
        let store = scratch_store();
        store.put("k", &1_u32).await.expect("first write");
        assert!(store.is_offline());

        // Later writes stay local without touching the network
        store.put("k", &2_u32).await.expect("second write");
        let value: Option<u32> = store.get("k").await.expect("read");
        assert_eq!(value, Some(2));
    }

    #[tokio::test]
    async fn test_failed_read_falls_back_to_cache() {
        let store = scratch_store();
        let value: Option<Vec<String>> = store.get("tnt_y:checkouts").await.expect("read");
        assert!(value.is_none());
        assert!(store.is_offline());
    }
}
