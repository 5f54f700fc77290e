//! Web searcher trait for evidence retrieval.
//!
//! Abstracts over search providers (Google Custom Search, Bing, etc.). The
//! researcher stage calls the searcher once per expanded query, merges and
//! deduplicates the results, and hands the ordered list to the evidence
//! synthesizer.

use async_trait::async_trait;

use crate::error::{FactCheckError, Result, SearchError};
use crate::types::search::SearchResult;

/// Web search trait for evidence retrieval.
///
/// # Implementations
///
/// - [`GoogleSearcher`] - Google Custom Search API
/// - [`MockWebSearcher`] - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web for results relevant to the query.
    ///
    /// Results come back in provider relevance order with 1-based ranks.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

/// Mock web searcher for testing.
#[derive(Default)]
pub struct MockWebSearcher {
    results: std::sync::RwLock<std::collections::HashMap<String, Vec<SearchResult>>>,
    fail: bool,
}

impl MockWebSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add results for a query.
    pub fn with_results(self, query: &str, results: Vec<SearchResult>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(query.to_string(), results);
        self
    }

    /// Make every search fail.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        if self.fail {
            return Err(FactCheckError::Search(SearchError::Provider {
                status: 429,
                message: "mock quota exceeded".to_string(),
            }));
        }

        let mut results = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default();
        results.truncate(max_results);
        Ok(results)
    }
}

const GOOGLE_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search backed searcher.
pub struct GoogleSearcher {
    api_key: crate::security::SecretString,
    cse_id: String,
    client: reqwest::Client,
}

impl GoogleSearcher {
    /// Create a new Google Custom Search client.
    pub fn new(api_key: impl Into<String>, cse_id: impl Into<String>) -> Self {
        Self {
            api_key: crate::security::SecretString::new(api_key),
            cse_id: cse_id.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WebSearcher for GoogleSearcher {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            items: Vec<Item>,
        }

        #[derive(serde::Deserialize)]
        struct Item {
            title: Option<String>,
            snippet: Option<String>,
            link: String,
            #[serde(rename = "displayLink")]
            display_link: Option<String>,
        }

        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery.into());
        }

        // The API caps num at 10 per request.
        let num = max_results.clamp(1, 10);

        let response = self
            .client
            .get(GOOGLE_SEARCH_API_URL)
            .query(&[
                ("key", self.api_key.expose()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", &num.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Provider {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: Response = response
            .json()
            .await
            .map_err(|e| SearchError::Decode(Box::new(e)))?;

        let results = body
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let mut result = SearchResult::new(
                    item.title.unwrap_or_default(),
                    item.snippet.unwrap_or_default(),
                    &item.link,
                )?
                .with_rank(i + 1);
                if let Some(domain) = item.display_link {
                    result = result.with_display_domain(domain);
                }
                Some(result)
            })
            .collect();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_web_searcher() {
        let searcher = MockWebSearcher::new().with_results(
            "berlin wall 1989",
            vec![
                SearchResult::new("Fall of the Berlin Wall", "The wall fell in 1989.", "https://en.wikipedia.org/wiki/Berlin_Wall")
                    .unwrap(),
                SearchResult::new("Berlin Wall", "History of the wall.", "https://history.state.gov/wall")
                    .unwrap()
                    .with_rank(2),
            ],
        );

        let results = searcher.search("berlin wall 1989", 10).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Fall of the Berlin Wall");
    }

    #[tokio::test]
    async fn test_mock_truncates_to_limit() {
        let results = vec![
            SearchResult::new("A", "a", "https://a.com").unwrap(),
            SearchResult::new("B", "b", "https://b.com").unwrap(),
            SearchResult::new("C", "c", "https://c.com").unwrap(),
        ];
        let searcher = MockWebSearcher::new().with_results("q", results);

        let found = searcher.search("q", 2).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let searcher = MockWebSearcher::failing();
        assert!(searcher.search("anything", 10).await.is_err());
    }
}
