//! ProductCache - versioned, time-boxed product list cache
//!
//! Persists the full product list as one JSON envelope under a fixed
//! file name so the storefront can paint before the remote store
//! answers. An envelope is only served while its version matches the
//! current schema and its age is inside the validity window; any
//! mismatch, expiry, or parse failure deletes the entry outright; there
//! is no partial reuse.
//!
//! The version string is derived from the product schema's field list,
//! so a schema change can never ship without invalidating envelopes
//! written by older builds.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::models::Product;
use shared::types::Timestamp;
use shared::util::now_millis;

/// Cache validity window: 24 hours
pub const CACHE_DURATION_MS: i64 = 24 * 60 * 60 * 1000;

/// Fixed storage key for the product envelope
const CACHE_FILE: &str = "products-cache.json";

/// Field list the cache version is derived from. Must track the
/// [`Product`] shape; a stale list only costs one cold load.
const PRODUCT_SCHEMA: &[&str] = &[
    "id",
    "name",
    "category",
    "price",
    "description",
    "link",
    "image",
    "images",
    "active",
];

/// Schema-derived cache version (first 16 hex chars of a SHA-256)
pub fn cache_version() -> String {
    let mut hasher = Sha256::new();
    hasher.update(PRODUCT_SCHEMA.join(",").as_bytes());
    hex::encode(hasher.finalize())[..16].to_string()
}

/// Persisted cache envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEnvelope {
    data: Vec<Product>,
    version: String,
    /// Write time (Unix milliseconds)
    timestamp: Timestamp,
}

/// Versioned, time-expiring product list cache
pub struct ProductCache {
    file_path: PathBuf,
    version: String,
}

impl ProductCache {
    /// Create a cache rooted at `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        if let Err(e) = std::fs::create_dir_all(data_dir) {
            tracing::warn!("Failed to create cache directory: {}", e);
        }
        Self {
            file_path: data_dir.join(CACHE_FILE),
            version: cache_version(),
        }
    }

    /// Write the product list.
    ///
    /// Serialization or storage failures are logged and reported as
    /// `false`; they never propagate to the caller.
    pub fn set(&self, products: &[Product]) -> bool {
        let envelope = CacheEnvelope {
            data: products.to_vec(),
            version: self.version.clone(),
            timestamp: now_millis(),
        };

        let content = match serde_json::to_string(&envelope) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to serialize product cache: {}", e);
                return false;
            }
        };

        match std::fs::write(&self.file_path, content) {
            Ok(()) => {
                tracing::debug!(count = products.len(), "Product cache written");
                true
            }
            Err(e) => {
                tracing::warn!("Failed to write product cache: {}", e);
                false
            }
        }
    }

    /// Read the cached product list, if still valid
    pub fn get(&self) -> Option<Vec<Product>> {
        self.get_at(now_millis())
    }

    /// Variant of [`get`](Self::get) with an explicit clock
    pub fn get_at(&self, now_ms: Timestamp) -> Option<Vec<Product>> {
        let content = std::fs::read_to_string(&self.file_path).ok()?;

        let envelope: CacheEnvelope = match serde_json::from_str(&content) {
            Ok(e) => e,
            Err(e) => {
                // Corrupted entry is indistinguishable from no entry
                tracing::warn!("Product cache unreadable, clearing: {}", e);
                self.clear();
                return None;
            }
        };

        if envelope.version != self.version {
            tracing::info!(
                cached = %envelope.version,
                expected = %self.version,
                "Product cache version mismatch, clearing"
            );
            self.clear();
            return None;
        }

        if now_ms - envelope.timestamp >= CACHE_DURATION_MS {
            tracing::info!("Product cache expired, clearing");
            self.clear();
            return None;
        }

        Some(envelope.data)
    }

    /// Unconditionally delete the stored entry
    pub fn clear(&self) {
        if self.file_path.exists()
            && let Err(e) = std::fs::remove_file(&self.file_path)
        {
            tracing::warn!("Failed to clear product cache: {}", e);
        }
    }

    /// Whether a `get()` right now would return data
    pub fn is_valid(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "decor".to_string(),
            price: Decimal::new(199, 1),
            description: String::new(),
            link: String::new(),
            image: String::new(),
            images: Vec::new(),
            active: true,
        }
    }

    #[test]
    fn test_round_trip_within_window() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProductCache::new(dir.path());

        assert!(cache.set(&[product("p1", "Vase"), product("p2", "Mug")]));
        let loaded = cache.get().expect("cache should be valid");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "p1");
        assert!(cache.is_valid());
    }

    #[test]
    fn test_expiry_deletes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProductCache::new(dir.path());
        cache.set(&[product("p1", "Vase")]);

        let future = now_millis() + CACHE_DURATION_MS;
        assert!(cache.get_at(future).is_none());
        // Deleted entirely: valid reads are impossible afterwards
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_version_mismatch_deletes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProductCache::new(dir.path());
        cache.set(&[product("p1", "Vase")]);

        // Rewrite the envelope as an older build would have
        let path = dir.path().join(CACHE_FILE);
        let content = std::fs::read_to_string(&path).unwrap();
        let stale = content.replace(&cache_version(), "0123456789abcdef");
        std::fs::write(&path, stale).unwrap();

        assert!(cache.get().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_failure_is_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProductCache::new(dir.path());

        let path = dir.path().join(CACHE_FILE);
        std::fs::write(&path, "{not json").unwrap();

        assert!(cache.get().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_clear_is_unconditional() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ProductCache::new(dir.path());
        cache.set(&[product("p1", "Vase")]);
        cache.clear();
        assert!(!cache.is_valid());
        // Clearing an already-empty cache is fine
        cache.clear();
    }
}
