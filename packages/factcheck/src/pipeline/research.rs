//! Research stage: query expansion, search execution, deduplication.
//!
//! Research never fails the pipeline: individual search errors are logged
//! and skipped, cache errors degrade to misses, and the worst case is an
//! empty result list (which the analyst turns into an `Insufficient`
//! bundle).

use tracing::{debug, info, warn};

use crate::traits::cache::ResultCache;
use crate::traits::searcher::WebSearcher;
use crate::types::config::PipelineConfig;
use crate::types::search::SearchResult;

const TRUSTED_SITE_FILTER: &str =
    "site:wikipedia.org OR site:britannica.com OR site:.edu OR site:.gov";

/// Expand a query into up to 3 diverse search queries.
///
/// The original query is always first, followed by a history-context variant
/// (skipped when the query already mentions history) and a facts variant
/// (skipped when the query already mentions truth or facts). With
/// `trusted_sources_only`, every variant gets a trusted-domain site filter.
pub fn expand_query(query: &str, trusted_sources_only: bool) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return vec![];
    }

    let lower = query.to_lowercase();
    let with_filter = |q: String| {
        if trusted_sources_only {
            format!("{q} {TRUSTED_SITE_FILTER}")
        } else {
            q
        }
    };

    let mut expanded = vec![with_filter(query.to_string())];

    if !lower.contains("history") {
        expanded.push(with_filter(format!("{query} history")));
    }

    if !lower.contains("truth") && !lower.contains("fact") && expanded.len() < 3 {
        expanded.push(with_filter(format!("{query} facts")));
    }

    expanded.truncate(3);
    expanded
}

/// Deduplicate results by URL, case-insensitively, keeping the first
/// (highest-ranked) occurrence.
pub fn deduplicate_by_url(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = std::collections::HashSet::new();
    let total = results.len();

    let deduplicated: Vec<SearchResult> = results
        .into_iter()
        .filter(|r| seen.insert(r.url.as_str().to_lowercase()))
        .collect();

    info!(
        total,
        unique = deduplicated.len(),
        "deduplicated search results"
    );
    deduplicated
}

/// Run the research stage: cache lookup, expanded searches, deduplication,
/// re-ranking, truncation, and cache write-back.
pub async fn run_research<S, C>(
    searcher: &S,
    cache: &C,
    query: &str,
    config: &PipelineConfig,
) -> Vec<SearchResult>
where
    S: WebSearcher + ?Sized,
    C: ResultCache + ?Sized,
{
    match cache.get(query, config.max_search_results).await {
        Ok(Some(cached)) => {
            debug!(query, results = cached.len(), "using cached search results");
            return cached;
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "cache read failed, searching fresh"),
    }

    let queries = expand_query(query, config.trusted_sources_only);
    info!(query, expanded = queries.len(), "starting research");

    let mut all_results: Vec<SearchResult> = vec![];
    for (i, q) in queries.iter().enumerate() {
        match searcher.search(q, config.max_search_results).await {
            Ok(results) => {
                debug!(query = %q, results = results.len(), "search query succeeded");
                all_results.extend(results);
            }
            Err(e) => {
                warn!(query = %q, index = i + 1, error = %e, "search query failed, continuing");
            }
        }
    }

    let mut results = deduplicate_by_url(all_results);
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
    }
    results.truncate(config.max_search_results);

    if let Err(e) = cache
        .put(query, config.max_search_results, &results)
        .await
    {
        warn!(error = %e, "cache write failed");
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::cache::NoCache;
    use crate::traits::searcher::MockWebSearcher;
    use crate::stores::MemoryCache;

    fn result(url: &str) -> SearchResult {
        SearchResult::new("Title", "Snippet", url).unwrap()
    }

    #[test]
    fn test_expand_query_basic() {
        let queries = expand_query("did the berlin wall fall in 1989", false);
        assert_eq!(
            queries,
            vec![
                "did the berlin wall fall in 1989",
                "did the berlin wall fall in 1989 history",
                "did the berlin wall fall in 1989 facts",
            ]
        );
    }

    #[test]
    fn test_expand_query_skips_redundant_variants() {
        let queries = expand_query("history of the berlin wall", false);
        assert_eq!(
            queries,
            vec!["history of the berlin wall", "history of the berlin wall facts"]
        );

        let queries = expand_query("the truth about the berlin wall", false);
        assert_eq!(
            queries,
            vec![
                "the truth about the berlin wall",
                "the truth about the berlin wall history",
            ]
        );
    }

    #[test]
    fn test_expand_query_empty() {
        assert!(expand_query("   ", false).is_empty());
    }

    #[test]
    fn test_expand_query_trusted_filter() {
        let queries = expand_query("berlin wall", true);
        assert!(queries.iter().all(|q| q.contains("site:wikipedia.org")));
    }

    #[test]
    fn test_deduplicate_case_insensitive_first_wins() {
        let mut a = result("https://example.com/Article");
        a.title = "first".to_string();
        let mut b = result("https://example.com/Article");
        b.title = "second".to_string();

        let unique = deduplicate_by_url(vec![a, b, result("https://example.com/other")]);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].title, "first");
    }

    #[tokio::test]
    async fn test_run_research_merges_and_reranks() {
        let searcher = MockWebSearcher::new()
            .with_results(
                "berlin wall",
                vec![result("https://a.com/1"), result("https://b.com/2")],
            )
            .with_results("berlin wall history", vec![result("https://a.com/1")])
            .with_results("berlin wall facts", vec![result("https://c.com/3")]);

        let results = run_research(
            &searcher,
            &NoCache,
            "berlin wall",
            &PipelineConfig::default(),
        )
        .await;

        assert_eq!(results.len(), 3);
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_run_research_survives_search_failure() {
        let searcher = MockWebSearcher::failing();
        let results = run_research(
            &searcher,
            &NoCache,
            "berlin wall",
            &PipelineConfig::default(),
        )
        .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_run_research_prefers_cache() {
        let cache = MemoryCache::new(24);
        cache
            .put("berlin wall", 10, &[result("https://cached.com/a")])
            .await
            .unwrap();

        // A failing searcher proves the cache short-circuits.
        let searcher = MockWebSearcher::failing();
        let results =
            run_research(&searcher, &cache, "berlin wall", &PipelineConfig::default()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_domain, "cached.com");
    }

    #[tokio::test]
    async fn test_run_research_truncates_to_max() {
        let many: Vec<SearchResult> = (0..20)
            .map(|i| result(&format!("https://example.com/{i}")))
            .collect();
        let searcher = MockWebSearcher::new().with_results("q", many);

        let config = PipelineConfig::default().with_max_search_results(5);
        let results = run_research(&searcher, &NoCache, "q", &config).await;
        assert_eq!(results.len(), 5);
    }
}
