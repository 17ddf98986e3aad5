//! Durable local cache for offline mode.
//!
//! One JSON file per store key under the configured cache directory.
//! Writes land in a temp file first and are renamed into place, so a crash
//! mid-write never leaves a corrupt entry behind.

use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use super::StoreError;

/// File-backed cache that survives process restarts.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Create a cache rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Store keys contain ':'; keep filenames portable
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// Read the cached value for `key`; `None` if never written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O or decode failures.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `value` for `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O or encode failures.
    pub async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(value)?;

        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_cache() -> LocalCache {
        let dir = std::env::temp_dir().join(format!(
            "launchpay-cache-test-{}",
            uuid::Uuid::new_v4().simple()
        ));
        LocalCache::new(dir)
    }

    #[tokio::test]
    async fn test_read_missing_key_is_none() {
        let cache = scratch_cache();
        let value: Option<Vec<String>> = cache.read("tnt_x:checkouts").await.expect("read");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trips() {
        let cache = scratch_cache();
        let written = vec!["a".to_string(), "b".to_string()];

        cache.write("tnt_x:checkouts", &written).await.expect("write");
        let read: Option<Vec<String>> = cache.read("tnt_x:checkouts").await.expect("read");
        assert_eq!(read, Some(written));
    }

    #[tokio::test]
    async fn test_write_replaces_previous_entry() {
        let cache = scratch_cache();
        cache.write("k", &1_u32).await.expect("first write");
        cache.write("k", &2_u32).await.expect("second write");

        let read: Option<u32> = cache.read("k").await.expect("read");
        assert_eq!(read, Some(2));
    }

    #[test]
    fn test_path_sanitizes_key() {
        let cache = LocalCache::new("/tmp/cache");
        let path = cache.path_for("tnt_a:checkouts");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("tnt_a_checkouts.json")
        );
    }
}
