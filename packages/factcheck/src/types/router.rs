//! Router decision types.
//!
//! The router's output is part of the pipeline contract, not a log-only
//! artifact: the orchestrator branches on `route`, the clarify UI consumes
//! `clarify_request`, and debug tooling reads the feature snapshot.

use serde::{Deserialize, Serialize};

use crate::pipeline::features::{Language, QueryFeatures};
use crate::types::clarify::ClarifyRequest;

/// The specific pattern/rule that produced a routing decision.
///
/// Clarification triggers mean the query needs more information; out-of-scope
/// triggers mean the query is not a historical fact-check; fact-check
/// triggers proceed into the evidence pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouterTrigger {
    // Clarification triggers
    EmptyQuery,
    TooShort,
    UnderspecifiedQuery,
    UnresolvedPronoun,
    AmbiguousReference,
    OverlyBroad,
    UnsupportedLanguage,

    // Out-of-scope triggers
    CreativeWriting,
    CodingRequest,
    ChatRequest,
    FuturePrediction,
    CurrentEvents,
    OpinionRequest,
    NonHistoricalIntent,

    // Fact-check triggers
    DefaultFactCheck,
    ExplicitVerification,
}

/// Final routing decision: where the query goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    FactCheck,
    Clarify,
    OutOfScope,
}

/// Fine-grained intent category for out-of-scope queries.
///
/// Buckets are matched in declared order; the first bucket with a matching
/// phrase wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    CreativeRequest,
    CodingRequest,
    ChatRequest,
    OpinionRequest,
}

impl IntentKind {
    /// Wire representation ("creative_request", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreativeRequest => "creative_request",
            Self::CodingRequest => "coding_request",
            Self::ChatRequest => "chat_request",
            Self::OpinionRequest => "opinion_request",
        }
    }
}

/// Structured result of a routing decision.
///
/// A deterministic pure function of (query, router config): routing the same
/// query twice yields an identical decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterDecision {
    /// Which pattern/rule triggered this routing decision.
    pub trigger: RouterTrigger,

    /// Final routing decision.
    pub route: Route,

    /// Human-readable explanation of why this decision was made.
    pub reasoning: String,

    /// Confidence in the routing decision (0.0-1.0).
    pub confidence: f32,

    /// Names of the patterns that matched, for debugging.
    pub matched_patterns: Vec<String>,

    /// Number of words in the user query.
    pub query_length_words: usize,

    /// Whether the query contains historical entities, dates, or keywords.
    pub has_historical_markers: bool,

    /// Detected query language.
    pub detected_language: Language,

    /// Feature snapshot computed for this query.
    pub features: QueryFeatures,

    /// Intent category, set iff `route` is `OutOfScope`.
    pub intent_type: Option<IntentKind>,

    /// Clarification request, set iff `route` is `Clarify`.
    pub clarify_request: Option<ClarifyRequest>,
}
