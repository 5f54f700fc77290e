//! Writer stage: evidence-grounded answer generation with citation
//! enforcement.
//!
//! The writer never fails the pipeline. Three fallback paths replace the
//! model answer with a conservative one: no evidence retrieved, generation
//! error, and invalid citations. Each path is tagged with a `strategy`
//! string for observability.

use serde::Deserialize;
use tracing::{info, warn};

use crate::pipeline::prompts::format_writer_prompt;
use crate::pipeline::validation::{calculate_confidence, extract_citation_ids, validate_citations};
use crate::traits::ai::AI;
use crate::types::evidence::{Citation, EvidenceBundle, EvidenceVerdict};
use crate::types::writer::WriterOutput;

const NO_EVIDENCE_ANSWER: &str = "I cannot verify this claim because I could not retrieve any \
     relevant evidence. Please refine your question or try again later.";

const GENERATION_ERROR_ANSWER: &str = "I cannot verify this claim right now because the \
     answer-generation model is currently unavailable.";

const CITATION_INVALID_ANSWER: &str = "I cannot safely verify this claim using the retrieved \
     evidence. The sources appear insufficient, inconsistent, or the citations are unclear.";

/// Writer output plus the display citations derived from it.
#[derive(Debug, Clone)]
pub struct WriterReport {
    /// The structured writer output.
    pub output: WriterOutput,

    /// Display citations, one per valid evidence ID in the answer. Empty
    /// when any fallback cleared the evidence IDs.
    pub citations: Vec<Citation>,
}

/// Model payload shape. Missing fields take defaults; a missing confidence
/// takes the -1.0 sentinel meaning "model provided no self-assessment".
#[derive(Debug, Deserialize)]
struct GeneratorPayload {
    #[serde(default)]
    answer: String,
    #[serde(default = "confidence_sentinel")]
    confidence: f32,
    #[serde(default)]
    evidence_ids: Vec<String>,
    #[serde(default)]
    limitations: String,
}

fn confidence_sentinel() -> f32 {
    -1.0
}

/// Parse raw model output.
///
/// A JSON object is taken as the structured payload; anything else is
/// treated as a plain-text answer with a neutral 0.5 confidence.
fn parse_generator_output(raw: &str) -> GeneratorPayload {
    match serde_json::from_str::<GeneratorPayload>(raw) {
        Ok(payload) => payload,
        Err(_) => GeneratorPayload {
            answer: raw.to_string(),
            confidence: 0.5,
            evidence_ids: vec![],
            limitations: String::new(),
        },
    }
}

/// Generate the final evidence-grounded answer for a query.
pub async fn write_answer<A: AI + ?Sized>(
    ai: &A,
    query: &str,
    bundle: &EvidenceBundle,
) -> WriterReport {
    // No evidence at all: conservative fallback, no model call.
    if bundle.evidence_items.is_empty() {
        info!(query, "no evidence available, skipping generation");
        return WriterReport {
            output: WriterOutput {
                answer: NO_EVIDENCE_ANSWER.to_string(),
                confidence: 0.2,
                evidence_ids: vec![],
                limitations: "No evidence was retrieved for this query.".to_string(),
                verdict: EvidenceVerdict::Insufficient,
                citation_valid: true,
                fallback_used: true,
                strategy: "no_evidence_fallback".to_string(),
                raw_model_output: None,
            },
            citations: vec![],
        };
    }

    let prompt = format_writer_prompt(query, &bundle.evidence_items);

    let raw = match ai.generate_answer(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "answer generation failed");
            return WriterReport {
                output: WriterOutput {
                    answer: GENERATION_ERROR_ANSWER.to_string(),
                    confidence: 0.2,
                    evidence_ids: vec![],
                    limitations: format!("Model failure: {e}"),
                    verdict: EvidenceVerdict::Insufficient,
                    citation_valid: true,
                    fallback_used: true,
                    strategy: "generation_error_fallback".to_string(),
                    raw_model_output: None,
                },
                citations: vec![],
            };
        }
    };

    let payload = parse_generator_output(&raw);
    let answer = payload.answer.trim().to_string();

    // When the payload omitted evidence_ids, recover them from the inline
    // [E#] markers.
    let cited_in_text = extract_citation_ids(&answer);
    let evidence_ids = if payload.evidence_ids.is_empty() && !cited_in_text.is_empty() {
        cited_in_text.iter().cloned().collect()
    } else {
        payload.evidence_ids
    };

    let check = validate_citations(&answer, bundle);

    // The claimed id list must also stay inside the bundle; an id the model
    // invented there is as ungrounded as a bad inline marker.
    let claimed_valid = evidence_ids.iter().all(|id| check.available_ids.contains(id));

    let mut confidence = calculate_confidence(payload.confidence, bundle, &check.cited_ids);

    if check.is_valid && claimed_valid {
        let citations = evidence_ids
            .iter()
            .filter_map(|id| {
                bundle.item(id).map(|item| Citation {
                    evidence_id: id.clone(),
                    url: item.url.clone(),
                    title: item.title.clone(),
                })
            })
            .collect();

        return WriterReport {
            output: WriterOutput {
                answer,
                confidence,
                evidence_ids,
                limitations: payload.limitations,
                verdict: bundle.overall_verdict,
                citation_valid: true,
                fallback_used: false,
                strategy: "llm_writer".to_string(),
                raw_model_output: Some(raw),
            },
            citations,
        };
    }

    // Invalid or missing citations: refuse rather than risk an ungrounded
    // answer.
    warn!(
        invalid = ?check.invalid_ids,
        cited = ?check.cited_ids,
        claimed = ?evidence_ids,
        "citation validation failed"
    );
    confidence = confidence.min(0.3);

    let limitations = if payload.limitations.is_empty() {
        "Citation validation failed.".to_string()
    } else {
        format!("{} Citation validation failed.", payload.limitations)
    };

    WriterReport {
        output: WriterOutput {
            answer: CITATION_INVALID_ANSWER.to_string(),
            confidence,
            evidence_ids: vec![],
            limitations,
            verdict: bundle.overall_verdict,
            citation_valid: false,
            fallback_used: true,
            strategy: "llm_writer_with_fallback".to_string(),
            raw_model_output: Some(raw),
        },
        citations: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockAI;
    use crate::types::evidence::{EvidenceItem, Finding};
    use url::Url;

    fn bundle(ids: &[&str], verdict: EvidenceVerdict) -> EvidenceBundle {
        EvidenceBundle {
            evidence_items: ids
                .iter()
                .map(|id| EvidenceItem {
                    id: id.to_string(),
                    title: format!("Source {id}"),
                    snippet: "snippet".to_string(),
                    url: Url::parse(&format!("https://example.com/{id}")).unwrap(),
                    display_domain: "example.com".to_string(),
                })
                .collect(),
            findings: vec![Finding {
                claim: "claim".to_string(),
                verdict,
                evidence_ids: ids.iter().map(|s| s.to_string()).collect(),
            }],
            overall_verdict: verdict,
        }
    }

    #[tokio::test]
    async fn test_no_evidence_fallback() {
        let ai = MockAI::new();
        let report = write_answer(&ai, "q", &EvidenceBundle::empty()).await;

        assert!(report.output.fallback_used);
        assert_eq!(report.output.strategy, "no_evidence_fallback");
        assert_eq!(report.output.confidence, 0.2);
        assert_eq!(report.output.verdict, EvidenceVerdict::Insufficient);
        assert!(report.citations.is_empty());
    }

    #[tokio::test]
    async fn test_generation_error_fallback() {
        let ai = MockAI::new().failing_generation();
        let report = write_answer(&ai, "q", &bundle(&["E1"], EvidenceVerdict::Supported)).await;

        assert_eq!(report.output.strategy, "generation_error_fallback");
        assert_eq!(report.output.confidence, 0.2);
        assert!(report.output.limitations.starts_with("Model failure:"));
    }

    #[tokio::test]
    async fn test_valid_json_answer() {
        let ai = MockAI::new().with_answer(
            r#"{"answer": "The wall fell in 1989 [E1][E2][E3].",
                "confidence": 0.9,
                "evidence_ids": ["E1", "E2", "E3"],
                "limitations": ""}"#,
        );
        let b = bundle(&["E1", "E2", "E3"], EvidenceVerdict::Supported);
        let report = write_answer(&ai, "q", &b).await;

        assert_eq!(report.output.strategy, "llm_writer");
        assert!(report.output.citation_valid);
        assert!(!report.output.fallback_used);
        // 0.8 * 0.6 + 0.9 * 0.4 = 0.84, +0.05 for three cited sources.
        assert!((report.output.confidence - 0.89).abs() < 1e-6);
        assert_eq!(report.citations.len(), 3);
        assert_eq!(report.citations[0].evidence_id, "E1");
    }

    #[tokio::test]
    async fn test_plain_text_answer_with_markers() {
        let ai = MockAI::new().with_answer("The wall fell in 1989 [E1].");
        let b = bundle(&["E1", "E2"], EvidenceVerdict::Supported);
        let report = write_answer(&ai, "q", &b).await;

        assert_eq!(report.output.strategy, "llm_writer");
        // Plain text parses with a neutral 0.5 confidence, one source caps
        // at 0.7: 0.8 * 0.6 + 0.5 * 0.4 = 0.68.
        assert!((report.output.confidence - 0.68).abs() < 1e-6);
        assert_eq!(report.output.evidence_ids, vec!["E1"]);
        assert_eq!(report.citations.len(), 1);
    }

    #[tokio::test]
    async fn test_hallucinated_citation_triggers_fallback() {
        let ai = MockAI::new().with_answer(
            r#"{"answer": "Per [E9], the claim is true.", "confidence": 0.95}"#,
        );
        let b = bundle(&["E1", "E2"], EvidenceVerdict::Supported);
        let report = write_answer(&ai, "q", &b).await;

        assert_eq!(report.output.strategy, "llm_writer_with_fallback");
        assert!(!report.output.citation_valid);
        assert!(report.output.fallback_used);
        assert!(report.output.confidence <= 0.3);
        assert!(report.output.evidence_ids.is_empty());
        assert!(report.citations.is_empty());
        assert!(report.output.limitations.contains("Citation validation failed."));
    }

    #[tokio::test]
    async fn test_claimed_ids_outside_bundle_trigger_fallback() {
        // Valid inline marker, but the claimed id list names evidence the
        // bundle never contained.
        let ai = MockAI::new().with_answer(
            r#"{"answer": "Confirmed by [E1].", "confidence": 0.9, "evidence_ids": ["E7"]}"#,
        );
        let b = bundle(&["E1", "E2"], EvidenceVerdict::Supported);
        let report = write_answer(&ai, "q", &b).await;

        assert_eq!(report.output.strategy, "llm_writer_with_fallback");
        assert!(!report.output.citation_valid);
        assert!(report.output.fallback_used);
        assert!(report.output.confidence <= 0.3);
        assert!(report.output.evidence_ids.is_empty());
        assert!(report.citations.is_empty());
    }

    #[tokio::test]
    async fn test_uncited_answer_triggers_fallback() {
        let ai = MockAI::new()
            .with_answer(r#"{"answer": "The claim is true.", "confidence": 0.95}"#);
        let b = bundle(&["E1"], EvidenceVerdict::Supported);
        let report = write_answer(&ai, "q", &b).await;

        assert_eq!(report.output.strategy, "llm_writer_with_fallback");
        assert!(report.output.confidence <= 0.3);
    }

    #[tokio::test]
    async fn test_missing_confidence_uses_baseline_only() {
        let ai = MockAI::new().with_answer(
            r#"{"answer": "Refuted by [E1] and [E2].", "evidence_ids": ["E1", "E2"]}"#,
        );
        let b = bundle(&["E1", "E2"], EvidenceVerdict::NotSupported);
        let report = write_answer(&ai, "q", &b).await;

        // Sentinel confidence: NotSupported baseline 0.75, two sources, no
        // caps apply.
        assert!((report.output.confidence - 0.75).abs() < 1e-6);
        assert_eq!(report.output.strategy, "llm_writer");
    }
}
