//! Citation validation and hybrid confidence scoring for the writer stage.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::evidence::{EvidenceBundle, EvidenceVerdict};

/// Citation pattern: matches [E1], [E2], [E10], etc.
static CITATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[E(\d+)\]").unwrap());

/// Extract all citation IDs from answer text, deduplicated.
///
/// `"According to [E1] and [E2], then again [E1]"` yields `{E1, E2}`.
pub fn extract_citation_ids(text: &str) -> BTreeSet<String> {
    CITATION_PATTERN
        .captures_iter(text)
        .map(|c| format!("E{}", &c[1]))
        .collect()
}

/// Result of checking an answer's citations against the evidence bundle.
#[derive(Debug, Clone)]
pub struct CitationCheck {
    /// True iff at least one citation exists and none are hallucinated.
    pub is_valid: bool,

    /// All `[E#]` IDs found in the answer text.
    pub cited_ids: BTreeSet<String>,

    /// Cited IDs that exist in the bundle.
    pub valid_ids: BTreeSet<String>,

    /// Cited IDs that do not exist in the bundle.
    pub invalid_ids: BTreeSet<String>,

    /// All IDs the bundle offers.
    pub available_ids: BTreeSet<String>,
}

/// Validate the citations in `answer_text` against `bundle`.
pub fn validate_citations(answer_text: &str, bundle: &EvidenceBundle) -> CitationCheck {
    let cited_ids = extract_citation_ids(answer_text);
    let available_ids: BTreeSet<String> =
        bundle.available_ids().map(str::to_string).collect();

    let valid_ids: BTreeSet<String> =
        cited_ids.intersection(&available_ids).cloned().collect();
    let invalid_ids: BTreeSet<String> =
        cited_ids.difference(&available_ids).cloned().collect();

    CitationCheck {
        is_valid: invalid_ids.is_empty() && !cited_ids.is_empty(),
        cited_ids,
        valid_ids,
        invalid_ids,
        available_ids,
    }
}

/// Baseline confidence implied by an overall verdict.
pub fn verdict_baseline(verdict: EvidenceVerdict) -> f32 {
    match verdict {
        EvidenceVerdict::Supported => 0.8,
        // Refutation with clear evidence is almost as strong as support.
        EvidenceVerdict::NotSupported => 0.75,
        EvidenceVerdict::Contested => 0.5,
        EvidenceVerdict::Insufficient => 0.25,
    }
}

/// Hybrid confidence: verdict baseline blended with the model's
/// self-assessment, then capped by objective signals.
///
/// `llm_confidence < 0.0` is the sentinel for "model provided no
/// confidence"; in that case only the baseline is used. Cited-source counts
/// cap the score (0 sources -> at most 0.3, 1 source -> at most 0.7, 3+
/// sources -> small bonus), and any contested finding caps it at 0.6.
pub fn calculate_confidence(
    llm_confidence: f32,
    bundle: &EvidenceBundle,
    cited_ids: &BTreeSet<String>,
) -> f32 {
    let baseline = verdict_baseline(bundle.overall_verdict);

    let mut blended = if llm_confidence < 0.0 {
        baseline
    } else {
        baseline * 0.6 + llm_confidence.clamp(0.0, 1.0) * 0.4
    };

    match cited_ids.len() {
        0 => blended = blended.min(0.3),
        1 => blended = blended.min(0.7),
        n if n >= 3 => blended = (blended + 0.05).min(1.0),
        _ => {}
    }

    if bundle.has_contested_finding() {
        blended = blended.min(0.6);
    }

    blended.clamp(0.0, 1.0)
}
