//! AI trait for LLM operations.
//!
//! The AI trait abstracts the three LLM calls the fact-checking pipeline
//! makes:
//! - Decomposing a query into atomic claims
//! - Evaluating a (claim, evidence snippet) pair
//! - Generating the final evidence-grounded answer
//!
//! Every call site treats failure as recoverable: the pipeline substitutes a
//! named fallback value and continues, so implementations are free to return
//! errors for timeouts, quota, or malformed output.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::evidence::PairEvaluation;

/// AI trait for LLM operations.
///
/// Implementations wrap specific LLM providers and handle the specifics of
/// prompting and response parsing.
#[async_trait]
pub trait AI: Send + Sync {
    /// Decompose a query into 1-5 atomic, independently verifiable claims.
    ///
    /// Opinions, questions, and subjective statements are removed; a query
    /// that is already a single atomic claim comes back as-is.
    async fn extract_claims(&self, query: &str) -> Result<Vec<String>>;

    /// Evaluate whether an evidence snippet supports a claim.
    ///
    /// `credibility` is the source's normalized credibility (0.0-1.0), passed
    /// as a prompt input so higher-credibility sources can bias toward higher
    /// returned confidence. That bias is a generation-time hint, not a hard
    /// constraint.
    async fn evaluate_evidence(
        &self,
        claim: &str,
        snippet: &str,
        credibility: f32,
    ) -> Result<PairEvaluation>;

    /// Generate the final answer from an evidence-grounded prompt.
    ///
    /// The response may be a JSON object with `answer`, `confidence`,
    /// `evidence_ids`, and `limitations`, or plain text containing `[E#]`
    /// markers. The writer stage tolerates either shape.
    async fn generate_answer(&self, prompt: &str) -> Result<String>;
}
