//! In-memory result cache.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::Result;
use crate::stores::cache_key;
use crate::traits::cache::ResultCache;
use crate::types::search::SearchResult;

/// In-memory TTL cache for search results.
///
/// Entries expire `ttl_hours` after insertion. Suitable for tests and for
/// single-process deployments where persistence across restarts is not
/// needed.
pub struct MemoryCache {
    entries: RwLock<HashMap<String, (DateTime<Utc>, Vec<SearchResult>)>>,
    ttl_hours: i64,
}

impl MemoryCache {
    /// Create a cache with the given TTL in hours.
    pub fn new(ttl_hours: i64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_hours,
        }
    }

    fn is_fresh(&self, cached_at: DateTime<Utc>) -> bool {
        Utc::now() - cached_at < Duration::hours(self.ttl_hours)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(24)
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn get(&self, query: &str, count: usize) -> Result<Option<Vec<SearchResult>>> {
        let key = cache_key(query, count);
        let entries = self.entries.read().unwrap();

        match entries.get(&key) {
            Some((cached_at, results)) if self.is_fresh(*cached_at) => Ok(Some(results.clone())),
            _ => Ok(None),
        }
    }

    async fn put(&self, query: &str, count: usize, results: &[SearchResult]) -> Result<()> {
        let key = cache_key(query, count);
        self.entries
            .write()
            .unwrap()
            .insert(key, (Utc::now(), results.to_vec()));
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
        let cache = MemoryCache::new(24);
        let results = vec![result("https://example.com/a")];

        cache.put("berlin wall", 10, &results).await.unwrap();
        let hit = cache.get("berlin wall", 10).await.unwrap();
        assert_eq!(hit.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_key_includes_count() {
        let cache = MemoryCache::new(24);
        cache
            .put("berlin wall", 10, &[result("https://example.com/a")])
            .await
            .unwrap();

        assert!(cache.get("berlin wall", 5).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new(0);
        cache
            .put("berlin wall", 10, &[result("https://example.com/a")])
            .await
            .unwrap();

        assert!(cache.get("berlin wall", 10).await.unwrap().is_none());
    }
}
