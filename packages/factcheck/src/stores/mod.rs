//! Cache implementations.
//!
//! - [`MemoryCache`] - in-process cache for tests and short-lived runs
//! - [`FileCache`] - JSON-file cache that survives restarts and protects
//!   search API quota across development sessions

pub mod file;
pub mod memory;

pub use file::FileCache;
pub use memory::MemoryCache;

/// Build the canonical cache key for (query, count).
///
/// Queries are normalized (trimmed, lowercased) so trivially different
/// spellings share an entry.
pub(crate) fn cache_key(query: &str, count: usize) -> String {
    format!("{}:{}", query.trim().to_lowercase(), count)
}
