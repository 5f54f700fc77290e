//! Prompt text and formatting for the model-backed pipeline stages.
//!
//! The system prompts are published here so AI implementations share one
//! source of truth; the formatting helpers build the user-side messages the
//! pipeline sends.

use crate::types::evidence::EvidenceItem;

/// System prompt for decomposing a query into atomic, verifiable claims.
pub const CLAIM_EXTRACTION_PROMPT: &str = "\
You are a fact-checking assistant. Your task is to decompose a user's query into atomic, verifiable claims.

Rules:
1. Extract 1-5 distinct factual claims from the query
2. Each claim should be independently verifiable
3. Remove opinions, questions, and subjective statements
4. Keep claims concise but complete
5. If the query is already a single atomic claim, return it as-is";

/// System prompt for evaluating a single (claim, snippet) pair.
pub const EVIDENCE_EVAL_PROMPT: &str = "\
You are a Fact Analyst evaluating whether a SOURCE SNIPPET supports a CLAIM.

EVALUATION CRITERIA:
- SUPPORTED: The snippet EXPLICITLY confirms the claim is true
- NOT_SUPPORTED: The snippet EXPLICITLY contradicts or refutes the claim
- IRRELEVANT: The snippet doesn't address the claim or lacks sufficient detail

Consider the SOURCE_CREDIBILITY score (0.0-1.0) when assessing confidence:
- Higher credibility sources (0.7+) warrant higher confidence
- Lower credibility sources (below 0.5) warrant lower confidence

Be conservative: only mark SUPPORTED/NOT_SUPPORTED if the evidence is clear.";

/// Format the user-side input for per-pair evidence evaluation.
pub fn format_evidence_eval_input(claim: &str, snippet: &str, credibility: f32) -> String {
    format!("CLAIM: {claim}\nSNIPPET: {snippet}\nSOURCE_CREDIBILITY: {credibility}")
}

/// Build the writer prompt: persona, grounding rules, question, and one
/// evidence line per item.
pub fn format_writer_prompt(query: &str, evidence_items: &[EvidenceItem]) -> String {
    let mut lines = vec![
        "You are The Objective Historian.".to_string(),
        String::new(),
        "Use ONLY the evidence items below to answer the user's question.".to_string(),
        "Every factual statement MUST include at least one citation like [E1].".to_string(),
        String::new(),
        format!("Question: {query}"),
        String::new(),
        "Evidence:".to_string(),
    ];

    for item in evidence_items {
        lines.push(format!(
            "{}: {} — {} ({})",
            item.id, item.title, item.snippet, item.url
        ));
    }

    lines.join("\n")
}
