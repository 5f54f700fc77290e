//! Writer output: the final artifact of a fact-check run.

use serde::{Deserialize, Serialize};

use crate::types::evidence::EvidenceVerdict;

/// Structured result of the answer-writing stage.
///
/// This is the single source of truth for what a UI should show as the final
/// answer and what an evaluation harness should consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterOutput {
    /// Final Markdown answer, including `[E#]` citations that refer to
    /// evidence item IDs.
    pub answer: String,

    /// Final confidence in the factual accuracy, between 0 and 1.
    pub confidence: f32,

    /// Evidence item IDs actually used in the answer (e.g. ["E1", "E3"]).
    pub evidence_ids: Vec<String>,

    /// Short description of gaps, ambiguity, or contested points.
    pub limitations: String,

    /// Final verdict about the claim, typically mirroring the evidence
    /// bundle's overall verdict.
    pub verdict: EvidenceVerdict,

    /// True if the citations in `answer` are consistent with the evidence
    /// bundle (no unknown `[E#]` and at least one citation).
    pub citation_valid: bool,

    /// True if a conservative fallback template replaced the generated
    /// answer (missing evidence, generation failure, or invalid citations).
    pub fallback_used: bool,

    /// Which writer path produced this output, for observability
    /// ("llm_writer", "no_evidence_fallback", "generation_error_fallback",
    /// "llm_writer_with_fallback").
    pub strategy: String,

    /// Raw generator output before parsing, useful for debugging.
    pub raw_model_output: Option<String>,
}
