//! Result cache trait for search quota protection.
//!
//! Search results are cached keyed by (normalized query, requested count)
//! with a TTL measured in hours. The pipeline treats the cache as a simple
//! idempotent get/set dependency: cache failures degrade to misses, never to
//! pipeline errors.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::search::SearchResult;

/// Key-value cache for raw search result lists.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Retrieve cached results for (query, count), or `None` on miss/expiry.
    async fn get(&self, query: &str, count: usize) -> Result<Option<Vec<SearchResult>>>;

    /// Store results for (query, count).
    async fn put(&self, query: &str, count: usize, results: &[SearchResult]) -> Result<()>;
}

/// A cache that never hits and never stores. Useful when quota is no concern.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCache;

#[async_trait]
impl ResultCache for NoCache {
    async fn get(&self, _query: &str, _count: usize) -> Result<Option<Vec<SearchResult>>> {
        Ok(None)
    }

    async fn put(&self, _query: &str, _count: usize, _results: &[SearchResult]) -> Result<()> {
        Ok(())
    }
}
