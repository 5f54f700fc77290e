//! Source credibility scoring.
//!
//! A deterministic, offline tier model over the result's host and title. The
//! raw tier score orders evidence before per-pair evaluation; the normalized
//! score feeds the evaluator as a prior.

use crate::types::search::SearchResult;

/// Established news organizations scored above generic web sources.
const NEWS_DOMAINS: &[&str] = &[
    "reuters.com",
    "apnews.com",
    "bbc.com",
    "bbc.co.uk",
    "npr.org",
    "theguardian.com",
    "nytimes.com",
    "wsj.com",
    "washingtonpost.com",
    "bloomberg.com",
    "cnn.com",
    "dw.com",
    "france24.com",
    "wikipedia.org",
];

/// Hosts that are aggregated or user-generated enough to score below generic.
const LOW_QUALITY_DOMAINS: &[&str] = &[
    "answers.com",
    "ask.com",
    "quora.com",
    "reddit.com",
    "yahoo.com",
];

/// Tier-based credibility scorer for search results.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceCredibilityScorer;

impl SourceCredibilityScorer {
    pub const SCORE_FACT_CHECKER: u8 = 10;
    pub const SCORE_GOV_EDU: u8 = 8;
    pub const SCORE_NEWS_ORG: u8 = 6;
    pub const SCORE_GENERIC: u8 = 3;
    pub const SCORE_LOW_QUALITY: u8 = 2;

    pub fn new() -> Self {
        Self
    }

    /// Raw tier score in {2, 3, 6, 8, 10}. Higher is more credible.
    pub fn score(&self, result: &SearchResult) -> u8 {
        let title_lower = result.title.to_lowercase();
        if result.title.contains("[FACT-CHECK]") || title_lower.contains("fact check") {
            return Self::SCORE_FACT_CHECKER;
        }

        let host = result.url.host_str().unwrap_or_default().to_lowercase();

        if host.ends_with(".gov")
            || host.ends_with(".edu")
            || host.contains(".gov.")
            || host.contains(".edu.")
        {
            return Self::SCORE_GOV_EDU;
        }

        if NEWS_DOMAINS
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{d}")))
        {
            return Self::SCORE_NEWS_ORG;
        }

        if LOW_QUALITY_DOMAINS
            .iter()
            .any(|d| host == *d || host.ends_with(&format!(".{d}")))
        {
            return Self::SCORE_LOW_QUALITY;
        }

        Self::SCORE_GENERIC
    }

    /// Map a raw tier score to a [0, 1] credibility prior.
    pub fn normalize(&self, score: u8) -> f32 {
        match score {
            s if s >= Self::SCORE_GOV_EDU => 0.95,
            s if s >= Self::SCORE_NEWS_ORG => 0.70,
            s if s >= Self::SCORE_GENERIC => 0.50,
            _ => 0.30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str) -> SearchResult {
        SearchResult::new(title, "snippet", url).unwrap()
    }

    #[test]
    fn test_fact_checker_beats_domain() {
        let scorer = SourceCredibilityScorer::new();
        let r = result("[FACT-CHECK] Did Rome fall in 476?", "https://randomblog.net/a");
        assert_eq!(scorer.score(&r), 10);

        let r = result("Fact check: the moon landing", "https://example.com/a");
        assert_eq!(scorer.score(&r), 10);
    }

    #[test]
    fn test_gov_edu_tiers() {
        let scorer = SourceCredibilityScorer::new();
        assert_eq!(scorer.score(&result("t", "https://archives.gov/ww2")), 8);
        assert_eq!(scorer.score(&result("t", "https://history.yale.edu/rome")), 8);
        // International second-level registrations.
        assert_eq!(scorer.score(&result("t", "https://www.gov.uk/history")), 8);
        assert_eq!(scorer.score(&result("t", "https://history.edu.au/x")), 8);
    }

    #[test]
    fn test_news_and_subdomains() {
        let scorer = SourceCredibilityScorer::new();
        assert_eq!(scorer.score(&result("t", "https://www.reuters.com/a")), 6);
        assert_eq!(scorer.score(&result("t", "https://en.wikipedia.org/wiki/Rome")), 6);
    }

    #[test]
    fn test_lookalike_hosts_stay_generic() {
        let scorer = SourceCredibilityScorer::new();
        // Neither a listed domain nor a subdomain of one.
        assert_eq!(scorer.score(&result("t", "https://fakecnn.com/a")), 3);
        assert_eq!(scorer.score(&result("t", "https://bbc.com.evil.net/a")), 3);
        // A listed domain in the path does not count.
        assert_eq!(scorer.score(&result("t", "https://evil.net/cnn.com/a")), 3);
    }

    #[test]
    fn test_generic_and_low_quality() {
        let scorer = SourceCredibilityScorer::new();
        assert_eq!(scorer.score(&result("t", "https://someblog.io/post")), 3);
        assert_eq!(scorer.score(&result("t", "https://www.quora.com/q")), 2);
    }

    #[test]
    fn test_normalization_tiers() {
        let scorer = SourceCredibilityScorer::new();
        assert_eq!(scorer.normalize(10), 0.95);
        assert_eq!(scorer.normalize(8), 0.95);
        assert_eq!(scorer.normalize(6), 0.70);
        assert_eq!(scorer.normalize(3), 0.50);
        assert_eq!(scorer.normalize(2), 0.30);
    }
}
