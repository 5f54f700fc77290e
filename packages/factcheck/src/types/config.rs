//! Configuration for the routing and fact-checking pipeline.
//!
//! All configuration is carried by explicit, immutable structs passed into
//! the pipeline at call time. There is no ambient global settings object.

use serde::{Deserialize, Serialize};

/// Thresholds consumed read-only by the router.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Queries shorter than this many characters are underspecified.
    pub min_query_chars: usize,

    /// Queries with fewer words than this are underspecified.
    pub min_query_words: usize,

    /// How many years back still counts as "current events" (0 disables the
    /// current-events patterns entirely).
    pub current_events_years_ago: u32,

    /// Emit per-decision debug logs.
    pub debug: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 8,
            min_query_words: 2,
            current_events_years_ago: 0,
            debug: false,
        }
    }
}

impl RouterConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum query length in characters.
    pub fn with_min_query_chars(mut self, chars: usize) -> Self {
        self.min_query_chars = chars;
        self
    }

    /// Set the minimum query length in words.
    pub fn with_min_query_words(mut self, words: usize) -> Self {
        self.min_query_words = words;
        self
    }

    /// Enable debug logging of routing decisions.
    pub fn with_debug(mut self) -> Self {
        self.debug = true;
        self
    }
}

/// Configuration for the full fact-checking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Router thresholds.
    pub router: RouterConfig,

    /// Maximum deduplicated search results to keep per query.
    pub max_search_results: usize,

    /// Per-pair evaluation is capped at this many top-credibility evidence
    /// items to bound collaborator cost.
    pub top_evidence_limit: usize,

    /// Restrict search expansion to trusted reference domains.
    pub trusted_sources_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            router: RouterConfig::default(),
            max_search_results: 10,
            top_evidence_limit: 5,
            trusted_sources_only: false,
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the router configuration.
    pub fn with_router(mut self, router: RouterConfig) -> Self {
        self.router = router;
        self
    }

    /// Set the maximum number of search results to keep.
    pub fn with_max_search_results(mut self, max: usize) -> Self {
        self.max_search_results = max;
        self
    }

    /// Set the top-evidence cap for per-pair evaluation.
    pub fn with_top_evidence_limit(mut self, limit: usize) -> Self {
        self.top_evidence_limit = limit;
        self
    }

    /// Only search trusted reference domains.
    pub fn trusted_sources_only(mut self) -> Self {
        self.trusted_sources_only = true;
        self
    }
}
