//! Clarification request contract, used when the route is `Clarify`.
//!
//! The router fills this when it cannot construct a precise historical claim
//! to fact-check. A UI should show `message` and render `fields` as follow-up
//! questions. Built once per clarify decision and never mutated afterward.

use serde::{Deserialize, Serialize};

/// Which slot a clarification field asks the user to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarifyFieldKey {
    Claim,
    Entity,
    Event,
    TimePeriod,
    Location,
}

/// Why the pipeline is asking for clarification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarifyReasonCode {
    EmptyQuery,
    UnderspecifiedQuery,
    AmbiguousReference,
    Other,
}

/// A single clarification field the UI can render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarifyField {
    /// Stable slot key.
    pub key: ClarifyFieldKey,

    /// Question to show the user.
    pub question: String,

    /// Optional example or hint.
    pub hint: Option<String>,
}

impl ClarifyField {
    fn new(key: ClarifyFieldKey, question: &str, hint: &str) -> Self {
        Self {
            key,
            question: question.to_string(),
            hint: Some(hint.to_string()),
        }
    }
}

/// Contract used when the route is `Clarify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarifyRequest {
    /// Why clarification is needed.
    pub reason_code: ClarifyReasonCode,

    /// Message to show the user.
    pub message: String,

    /// The raw, unstripped query that triggered clarification.
    pub original_query: String,

    /// Ordered follow-up fields for the UI.
    pub fields: Vec<ClarifyField>,
}

impl ClarifyRequest {
    /// Build a request for an empty/whitespace-only query.
    pub fn from_empty_query(original_query: &str) -> Self {
        Self {
            reason_code: ClarifyReasonCode::EmptyQuery,
            original_query: original_query.to_string(),
            message:
                "Please type a historical claim or question you would like me to fact-check."
                    .to_string(),
            fields: vec![ClarifyField::new(
                ClarifyFieldKey::Claim,
                "What historical event, person, or claim should I check?",
                "For example: 'Did the Berlin Wall fall in 1989?'",
            )],
        }
    }

    /// Build a request for an underspecified or ambiguous query.
    ///
    /// Always asks for a clear claim. When the query carried historical
    /// markers and the problem is underspecification, also asks for a time
    /// period to narrow the search.
    pub fn from_query(
        original_query: &str,
        reason_code: ClarifyReasonCode,
        has_historical_markers: bool,
    ) -> Self {
        let mut fields = vec![ClarifyField::new(
            ClarifyFieldKey::Claim,
            "What exactly do you want me to verify?",
            "For example: 'Did X happen in year Y?' or 'Was person P involved in event E?'",
        )];

        if has_historical_markers && reason_code == ClarifyReasonCode::UnderspecifiedQuery {
            fields.push(ClarifyField::new(
                ClarifyFieldKey::TimePeriod,
                "For which time period or date should I check this?",
                "If you know an approximate year or era, that helps reduce ambiguity.",
            ));
        }

        let message = match reason_code {
            ClarifyReasonCode::UnderspecifiedQuery => {
                "Your question is a bit too short for me to identify a specific historical claim."
            }
            ClarifyReasonCode::AmbiguousReference => {
                "I am not sure what 'this/that/it' refers to in your question. \
                 Please specify the historical event, person, or claim."
            }
            _ => {
                "I need a bit more detail to understand the historical claim you want me to check."
            }
        };

        Self {
            reason_code,
            original_query: original_query.to_string(),
            message: message.to_string(),
            fields,
        }
    }
}
