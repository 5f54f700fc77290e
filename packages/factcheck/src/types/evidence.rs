//! Evidence types: items, verdicts, findings, and the bundle aggregate.
//!
//! Evidence IDs follow the `E<n>` scheme (`E1`, `E2`, ...), assigned in
//! descending credibility order. `E1` is always the most credible source;
//! downstream citation validation and top-N truncation rely on that ordering.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FactCheckError, Result};

static EVIDENCE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^E\d+$").unwrap());

/// Check whether a string is a well-formed evidence ID (`E` + digits).
pub fn is_valid_evidence_id(id: &str) -> bool {
    EVIDENCE_ID_PATTERN.is_match(id)
}

/// Individual evidence item with a stable citation ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Evidence ID in format "E1", "E2", etc.
    pub id: String,

    /// Source title.
    pub title: String,

    /// Relevant snippet from the source.
    pub snippet: String,

    /// Source URL.
    pub url: Url,

    /// Display domain of the source (e.g. "wikipedia.org").
    pub display_domain: String,
}

/// Normalized verdict for a claim based on the collected evidence.
///
/// - `Supported` – the evidence confirms the claim.
/// - `NotSupported` – the evidence contradicts or refutes the claim.
/// - `Contested` – the evidence conflicts across sources.
/// - `Insufficient` – not enough evidence to decide either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceVerdict {
    Supported,
    NotSupported,
    Contested,
    Insufficient,
}

impl EvidenceVerdict {
    /// Lenient string-to-enum conversion for collaborator output.
    ///
    /// Accepts common casings and synonyms ("Supported", "NOT_SUPPORTED",
    /// "mixed", "unknown", ...). This is the single parsing point at the
    /// system boundary; internal code only sees the closed enum.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "supported" | "support" | "true" => Ok(Self::Supported),
            "not_supported" | "not supported" | "false" => Ok(Self::NotSupported),
            "contested" | "mixed" => Ok(Self::Contested),
            "insufficient" | "unknown" => Ok(Self::Insufficient),
            _ => Err(FactCheckError::UnknownVerdict {
                value: value.to_string(),
            }),
        }
    }

    /// Wire representation ("supported", "not_supported", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::NotSupported => "not_supported",
            Self::Contested => "contested",
            Self::Insufficient => "insufficient",
        }
    }
}

/// Verdict for a single (claim, evidence snippet) evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PairVerdict {
    /// The snippet explicitly confirms the claim.
    Supported,
    /// The snippet explicitly contradicts the claim.
    NotSupported,
    /// The snippet does not address the claim.
    Irrelevant,
}

impl PairVerdict {
    /// Lenient boundary parser for collaborator output.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "supported" | "support" => Ok(Self::Supported),
            "not_supported" | "not supported" | "refuted" => Ok(Self::NotSupported),
            "irrelevant" | "unrelated" => Ok(Self::Irrelevant),
            _ => Err(FactCheckError::UnknownVerdict {
                value: value.to_string(),
            }),
        }
    }
}

/// Result of evaluating one (claim, snippet) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairEvaluation {
    /// Whether the snippet supports, contradicts, or is irrelevant to the claim.
    pub verdict: PairVerdict,

    /// Confidence in this verdict (0.0-1.0).
    pub confidence: f32,

    /// Brief explanation for the verdict.
    pub reasoning: String,
}

/// A finding: one claim, its aggregated verdict, and the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// The claim being evaluated.
    pub claim: String,

    /// Aggregated verdict across the evaluated evidence.
    pub verdict: EvidenceVerdict,

    /// Evidence IDs supporting this finding, in evaluation order.
    pub evidence_ids: Vec<String>,
}

/// Complete evidence bundle: items, findings, and the overall verdict.
///
/// Invariants:
/// - `overall_verdict` is a deterministic function of `findings` (priority
///   ordering, see [`crate::pipeline::analyst::synthesize_overall_verdict`]).
/// - An empty `evidence_items` list forces `Insufficient` and no findings.
/// - Every ID in a finding's `evidence_ids` references an item in this bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceBundle {
    /// Evidence items in descending credibility order.
    pub evidence_items: Vec<EvidenceItem>,

    /// One finding per extracted claim.
    pub findings: Vec<Finding>,

    /// Overall verdict synthesized from all findings.
    pub overall_verdict: EvidenceVerdict,
}

impl EvidenceBundle {
    /// An empty bundle: no items, no findings, insufficient evidence.
    pub fn empty() -> Self {
        Self {
            evidence_items: vec![],
            findings: vec![],
            overall_verdict: EvidenceVerdict::Insufficient,
        }
    }

    /// All evidence IDs available in this bundle.
    pub fn available_ids(&self) -> impl Iterator<Item = &str> {
        self.evidence_items.iter().map(|item| item.id.as_str())
    }

    /// Look up an item by its evidence ID.
    pub fn item(&self, id: &str) -> Option<&EvidenceItem> {
        self.evidence_items.iter().find(|item| item.id == id)
    }

    /// Whether any finding in the bundle is contested.
    pub fn has_contested_finding(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.verdict == EvidenceVerdict::Contested)
    }
}

impl Default for EvidenceBundle {
    fn default() -> Self {
        Self::empty()
    }
}

/// Citation linking an evidence ID back to its source, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// Evidence ID being cited.
    pub evidence_id: String,

    /// URL of the cited source.
    pub url: Url,

    /// Title of the cited source.
    pub title: String,
}
