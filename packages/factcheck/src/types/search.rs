//! Search result types returned by search collaborators.

use serde::{Deserialize, Serialize};
use url::Url;

/// A single ranked result from a search provider.
///
/// Results arrive ordered by provider relevance; `rank` is the 1-based
/// position within that ordering and is preserved through deduplication so
/// ties in credibility scoring can fall back to provider order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the search result.
    pub title: String,

    /// Snippet/preview text from the result.
    pub snippet: String,

    /// Absolute URL of the result.
    pub url: Url,

    /// Display domain (e.g. "wikipedia.org").
    pub display_domain: String,

    /// 1-based rank position in the provider's ordering.
    pub rank: usize,
}

impl SearchResult {
    /// Create a new search result.
    ///
    /// Returns `None` if the URL does not parse. The display domain is
    /// derived from the URL host when not supplied by the provider.
    pub fn new(title: impl Into<String>, snippet: impl Into<String>, url: &str) -> Option<Self> {
        let url = Url::parse(url).ok()?;
        let display_domain = url.host_str().unwrap_or_default().to_string();
        Some(Self {
            title: title.into(),
            snippet: snippet.into(),
            url,
            display_domain,
            rank: 1,
        })
    }

    /// Set the display domain (providers often supply a cleaner value).
    pub fn with_display_domain(mut self, domain: impl Into<String>) -> Self {
        self.display_domain = domain.into();
        self
    }

    /// Set the rank position.
    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = rank;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_domain_from_url() {
        let result = SearchResult::new("Title", "Snippet", "https://www.bbc.com/news/1").unwrap();
        assert_eq!(result.display_domain, "www.bbc.com");
        assert_eq!(result.rank, 1);
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        assert!(SearchResult::new("Title", "Snippet", "not a url").is_none());
    }
}
