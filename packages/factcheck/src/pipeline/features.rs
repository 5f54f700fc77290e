//! Query feature extraction.
//!
//! A total, pure function over arbitrary text: every input, including empty
//! or non-English text, yields a feature record. Failure here is a bug, not
//! a recoverable condition.

use serde::{Deserialize, Serialize};

use crate::pipeline::patterns;

/// Detected query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    He,
}

impl Language {
    /// ISO 639-1 code ("en" or "he").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::He => "he",
        }
    }
}

/// Signals extracted from a single query, consumed by the router and
/// surfaced verbatim in the routing decision for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFeatures {
    /// Whitespace-separated token count of the stripped query.
    pub num_tokens: usize,

    /// Character count of the stripped query.
    pub num_chars: usize,

    /// Whether the query opens with a question word or auxiliary verb.
    pub starts_like_question: bool,

    /// Whether the query contains a free-floating "this"/"that"/"it".
    pub contains_ambiguous_pronoun: bool,

    /// Hebrew if any Hebrew-block character is present, else English.
    pub language: Language,

    /// Whether a year pattern or historical keyword is present.
    pub has_historical_markers: bool,

    /// Year-pattern matches found in the query, in order of appearance.
    pub year_matches: Vec<String>,
}

impl QueryFeatures {
    /// Extract features from raw query text.
    pub fn analyze(query: &str) -> Self {
        let stripped = query.trim();
        let lower = stripped.to_lowercase();

        let contains_ambiguous_pronoun = [" this ", " that ", " it "]
            .iter()
            .any(|p| lower.contains(p));

        let year_matches: Vec<String> = patterns::YEAR_PATTERN
            .find_iter(stripped)
            .map(|m| m.as_str().to_string())
            .collect();

        Self {
            num_tokens: stripped.split_whitespace().count(),
            num_chars: stripped.chars().count(),
            starts_like_question: patterns::starts_like_question(stripped),
            contains_ambiguous_pronoun,
            language: if patterns::contains_hebrew(stripped) {
                Language::He
            } else {
                Language::En
            },
            has_historical_markers: patterns::has_historical_markers(stripped),
            year_matches,
        }
    }
}
