//! Fact-checking pipeline: routing, research, analysis, and writing.
//!
//! [`Pipeline`] wires the stages together over three collaborator traits
//! (AI model, web searcher, result cache). Stage order:
//!
//! 1. **Router** - pure classification; clarify and out-of-scope queries
//!    never reach the network.
//! 2. **Research** - query expansion, cached search, deduplication.
//! 3. **Analyst** - credibility-ordered evidence, per-pair evaluation,
//!    verdict aggregation.
//! 4. **Writer** - evidence-grounded answer with citation enforcement.
//!
//! Collaborator failures degrade to conservative outcomes inside each stage;
//! `check` itself only fails on cancellation.

pub mod analyst;
pub mod credibility;
pub mod features;
pub mod patterns;
pub mod prompts;
pub mod research;
pub mod router;
pub mod validation;
pub mod writer;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{FactCheckError, Result};
use crate::pipeline::analyst::EvidenceAnalysis;
use crate::traits::ai::AI;
use crate::traits::cache::{NoCache, ResultCache};
use crate::traits::searcher::WebSearcher;
use crate::types::clarify::{ClarifyReasonCode, ClarifyRequest};
use crate::types::config::PipelineConfig;
use crate::types::evidence::Citation;
use crate::types::router::{IntentKind, Route, RouterDecision};
use crate::types::writer::WriterOutput;

/// What the pipeline produced for a query.
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    /// Full fact-check: generated answer, citations, and the underlying
    /// evidence analysis.
    Report {
        writer: WriterOutput,
        citations: Vec<Citation>,
        analysis: EvidenceAnalysis,
    },

    /// The query needs clarification before it can be checked.
    Clarify(ClarifyRequest),

    /// The query is not a historical fact-check. `intent` is the matched
    /// intent bucket; `None` when the current-events filter triggered.
    OutOfScope { intent: Option<IntentKind> },
}

/// Complete result of checking one query.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The routing decision, always present.
    pub router: RouterDecision,

    /// The outcome the route led to.
    pub outcome: CheckOutcome,
}

/// The fact-checking pipeline over pluggable collaborators.
pub struct Pipeline<A, S, C = NoCache> {
    ai: A,
    searcher: S,
    cache: C,
    config: PipelineConfig,
}

impl<A, S, C> Pipeline<A, S, C>
where
    A: AI,
    S: WebSearcher,
    C: ResultCache,
{
    /// Create a pipeline with default configuration.
    pub fn new(ai: A, searcher: S, cache: C) -> Self {
        Self {
            ai,
            searcher,
            cache,
            config: PipelineConfig::default(),
        }
    }

    /// Replace the pipeline configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Check a query end to end.
    ///
    /// Never fails: collaborator errors degrade inside the stages. Clarify
    /// and out-of-scope routes return without touching the network.
    pub async fn check(&self, query: &str) -> CheckReport {
        let decision = router::route(query, &self.config.router);
        info!(route = ?decision.route, trigger = ?decision.trigger, "query routed");

        let outcome = match decision.route {
            Route::Clarify => {
                let request = decision.clarify_request.clone().unwrap_or_else(|| {
                    ClarifyRequest::from_query(query, ClarifyReasonCode::Other, false)
                });
                CheckOutcome::Clarify(request)
            }
            Route::OutOfScope => CheckOutcome::OutOfScope {
                intent: decision.intent_type,
            },
            Route::FactCheck => {
                let results =
                    research::run_research(&self.searcher, &self.cache, query, &self.config)
                        .await;
                let analysis =
                    analyst::synthesize_evidence(&self.ai, query, &results, &self.config).await;
                let report = writer::write_answer(&self.ai, query, &analysis.bundle).await;

                info!(
                    verdict = analysis.bundle.overall_verdict.as_str(),
                    strategy = %report.output.strategy,
                    confidence = report.output.confidence,
                    "fact-check complete"
                );

                CheckOutcome::Report {
                    writer: report.output,
                    citations: report.citations,
                    analysis,
                }
            }
        };

        CheckReport {
            router: decision,
            outcome,
        }
    }

    /// Check a query, aborting early if `cancel` fires.
    pub async fn check_with_cancel(
        &self,
        query: &str,
        cancel: CancellationToken,
    ) -> Result<CheckReport> {
        tokio::select! {
            report = self.check(query) => Ok(report),
            _ = cancel.cancelled() => Err(FactCheckError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAI;
    use crate::traits::searcher::MockWebSearcher;
    use crate::types::evidence::{EvidenceVerdict, PairVerdict};
    use crate::types::router::RouterTrigger;
    use crate::types::search::SearchResult;

    fn result(title: &str, snippet: &str, url: &str) -> SearchResult {
        SearchResult::new(title, snippet, url).unwrap()
    }

    fn searcher_with(query: &str, results: Vec<SearchResult>) -> MockWebSearcher {
        // Cover all three expanded queries so every search succeeds.
        MockWebSearcher::new()
            .with_results(query, results)
            .with_results(&format!("{query} history"), vec![])
            .with_results(&format!("{query} facts"), vec![])
    }

    #[tokio::test]
    async fn test_supported_claim_end_to_end() {
        let query = "Did the Berlin Wall fall in 1989?";
        let snippet = "The Berlin Wall fell on 9 November 1989.";

        let ai = MockAI::new()
            .with_claims(query, &["The Berlin Wall fell in 1989"])
            .with_evaluation(
                "The Berlin Wall fell in 1989",
                snippet,
                PairVerdict::Supported,
                0.95,
            )
            .with_answer(
                r#"{"answer": "Yes, the Berlin Wall fell on 9 November 1989 [E1].",
                    "confidence": 0.9,
                    "evidence_ids": ["E1"],
                    "limitations": ""}"#,
            );
        let searcher = searcher_with(
            query,
            vec![result("Berlin Wall", snippet, "https://history.yale.edu/wall")],
        );

        let pipeline = Pipeline::new(ai, searcher, NoCache);
        let report = pipeline.check(query).await;

        assert_eq!(report.router.route, Route::FactCheck);
        let CheckOutcome::Report {
            writer,
            citations,
            analysis,
        } = report.outcome
        else {
            panic!("expected a fact-check report");
        };

        assert_eq!(analysis.bundle.overall_verdict, EvidenceVerdict::Supported);
        assert!(writer.citation_valid);
        assert!(!writer.fallback_used);
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].evidence_id, "E1");
        // Supported baseline 0.8 * 0.6 + 0.9 * 0.4 = 0.84, one source caps
        // at 0.7.
        assert!((writer.confidence - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_contested_claim_caps_confidence() {
        let query = "Did Rome fall in 476?";
        let support = "Rome fell in 476 AD.";
        let contradict = "The empire persisted in the East until 1453.";
        let claim = "Rome fell in 476";

        let ai = MockAI::new()
            .with_claims(query, &[claim])
            .with_evaluation(claim, support, PairVerdict::Supported, 0.9)
            .with_evaluation(claim, contradict, PairVerdict::NotSupported, 0.8)
            .with_answer(
                r#"{"answer": "Sources conflict [E1][E2].",
                    "confidence": 0.9,
                    "evidence_ids": ["E1", "E2"]}"#,
            );
        let searcher = searcher_with(
            query,
            vec![
                result("Fall of Rome", support, "https://history.yale.edu/rome"),
                result("Byzantium", contradict, "https://archives.gov/byzantium"),
            ],
        );

        let pipeline = Pipeline::new(ai, searcher, NoCache);
        let report = pipeline.check(query).await;

        let CheckOutcome::Report { writer, analysis, .. } = report.outcome else {
            panic!("expected a fact-check report");
        };
        assert_eq!(analysis.bundle.overall_verdict, EvidenceVerdict::Contested);
        assert!(writer.confidence <= 0.6);
    }

    #[tokio::test]
    async fn test_out_of_scope_skips_network() {
        // A failing searcher proves no search is attempted.
        let pipeline = Pipeline::new(MockAI::new(), MockWebSearcher::failing(), NoCache);
        let report = pipeline.check("write me a poem about rome").await;

        assert_eq!(report.router.route, Route::OutOfScope);
        let CheckOutcome::OutOfScope { intent } = report.outcome else {
            panic!("expected out of scope");
        };
        assert_eq!(intent, Some(IntentKind::CreativeRequest));
    }

    #[tokio::test]
    async fn test_underspecified_query_clarifies() {
        let pipeline = Pipeline::new(MockAI::new(), MockWebSearcher::failing(), NoCache);
        let report = pipeline.check("rome?").await;

        assert_eq!(report.router.trigger, RouterTrigger::UnderspecifiedQuery);
        let CheckOutcome::Clarify(request) = report.outcome else {
            panic!("expected clarify");
        };
        assert_eq!(request.reason_code, ClarifyReasonCode::UnderspecifiedQuery);
        assert_eq!(request.original_query, "rome?");
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_insufficient() {
        let query = "Did the Berlin Wall fall in 1989?";
        let pipeline = Pipeline::new(MockAI::new(), MockWebSearcher::failing(), NoCache);
        let report = pipeline.check(query).await;

        let CheckOutcome::Report { writer, analysis, .. } = report.outcome else {
            panic!("expected a fact-check report");
        };
        assert_eq!(analysis.bundle.overall_verdict, EvidenceVerdict::Insufficient);
        assert_eq!(writer.strategy, "no_evidence_fallback");
        assert_eq!(writer.confidence, 0.2);
    }

    #[tokio::test]
    async fn test_cancellation() {
        let pipeline = Pipeline::new(MockAI::new(), MockWebSearcher::failing(), NoCache);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = pipeline
            .check_with_cancel("Did the Berlin Wall fall in 1989?", cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, FactCheckError::Cancelled));
    }

    #[tokio::test]
    async fn test_uncancelled_token_completes() {
        let pipeline = Pipeline::new(MockAI::new(), MockWebSearcher::failing(), NoCache);
        let report = pipeline
            .check_with_cancel("rome?", CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.router.route, Route::Clarify);
    }
}
