//! JSON file-based result cache.
//!
//! One JSON file per (query, count) key, named by the SHA-256 of the
//! normalized key. Critical for saving search API quota during development
//! and demos.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::{FactCheckError, Result};
use crate::stores::cache_key;
use crate::traits::cache::ResultCache;
use crate::types::search::SearchResult;

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    cached_at: DateTime<Utc>,
    results: Vec<SearchResult>,
}

/// File-based cache for storing search results.
pub struct FileCache {
    cache_dir: PathBuf,
    ttl_hours: i64,
}

impl FileCache {
    /// Create a cache rooted at `cache_dir` with the given TTL in hours.
    ///
    /// The directory is created if it does not exist.
    pub async fn new(cache_dir: impl Into<PathBuf>, ttl_hours: i64) -> Result<Self> {
        let cache_dir = cache_dir.into();
        tokio::fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| FactCheckError::Cache(Box::new(e)))?;

        debug!(cache_dir = %cache_dir.display(), ttl_hours, "file cache initialized");
        Ok(Self {
            cache_dir,
            ttl_hours,
        })
    }

    fn entry_path(&self, query: &str, count: usize) -> PathBuf {
        let digest = Sha256::digest(cache_key(query, count).as_bytes());
        let name: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        self.cache_dir.join(format!("{name}.json"))
    }

    async fn read_entry(path: &Path) -> Option<CacheEntry> {
        let bytes = tokio::fs::read(path).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(entry) => Some(entry),
            Err(e) => {
                // A corrupt entry is a miss, not an error.
                warn!(path = %path.display(), error = %e, "discarding corrupt cache entry");
                None
            }
        }
    }
}

#[async_trait]
impl ResultCache for FileCache {
    async fn get(&self, query: &str, count: usize) -> Result<Option<Vec<SearchResult>>> {
        let path = self.entry_path(query, count);

        let Some(entry) = Self::read_entry(&path).await else {
            return Ok(None);
        };

        if Utc::now() - entry.cached_at >= Duration::hours(self.ttl_hours) {
            debug!(query, "cache entry expired");
            return Ok(None);
        }

        debug!(query, results = entry.results.len(), "cache hit");
        Ok(Some(entry.results))
    }

    async fn put(&self, query: &str, count: usize, results: &[SearchResult]) -> Result<()> {
        let entry = CacheEntry {
            cached_at: Utc::now(),
            results: results.to_vec(),
        };
        let bytes = serde_json::to_vec(&entry)?;

        tokio::fs::write(self.entry_path(query, count), bytes)
            .await
            .map_err(|e| FactCheckError::Cache(Box::new(e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str) -> SearchResult {
        SearchResult::new("Title", "Snippet", url).unwrap()
    }

    #[tokio::test]
    async fn test_roundtrip() {
        let dir = std::env::temp_dir().join(format!("factcheck-cache-{}", std::process::id()));
        let cache = FileCache::new(&dir, 24).await.unwrap();

        cache
            .put("did rome fall in 476", 10, &[result("https://example.edu/rome")])
            .await
            .unwrap();

        let hit = cache.get("did rome fall in 476", 10).await.unwrap();
        assert_eq!(hit.unwrap().len(), 1);

        // Different count is a different key.
        assert!(cache.get("did rome fall in 476", 3).await.unwrap().is_none());

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let dir = std::env::temp_dir().join(format!("factcheck-cache-ttl-{}", std::process::id()));
        let cache = FileCache::new(&dir, 0).await.unwrap();

        cache
            .put("query", 10, &[result("https://example.com/a")])
            .await
            .unwrap();
        assert!(cache.get("query", 10).await.unwrap().is_none());

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
