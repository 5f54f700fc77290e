//! Deterministic query router.
//!
//! Classifies a raw query into fact-check / clarify / out-of-scope before any
//! network or model call is made. Checks run in a fixed priority order and
//! the first matching rule wins, so routing is reproducible and cheap to
//! test. No I/O, no failure modes: every query gets a decision.

use tracing::debug;

use crate::pipeline::features::QueryFeatures;
use crate::pipeline::patterns;
use crate::types::clarify::{ClarifyReasonCode, ClarifyRequest};
use crate::types::config::RouterConfig;
use crate::types::router::{Route, RouterDecision, RouterTrigger};

/// Route a query.
///
/// Priority order: empty query, non-historical intent, current events (only
/// when configured), underspecified query, ambiguous reference, fact-check.
pub fn route(query: &str, config: &RouterConfig) -> RouterDecision {
    let features = QueryFeatures::analyze(query);
    let stripped = query.trim();
    let lower = stripped.to_lowercase();

    let decision = decide(query, stripped, &lower, features, config);

    if config.debug {
        debug!(
            route = ?decision.route,
            trigger = ?decision.trigger,
            confidence = decision.confidence,
            words = decision.query_length_words,
            "routing decision"
        );
    }
    decision
}

fn decide(
    query: &str,
    stripped: &str,
    lower: &str,
    features: QueryFeatures,
    config: &RouterConfig,
) -> RouterDecision {
    let base = |features: QueryFeatures| RouterDecision {
        trigger: RouterTrigger::DefaultFactCheck,
        route: Route::FactCheck,
        reasoning: String::new(),
        confidence: 0.0,
        matched_patterns: vec![],
        query_length_words: features.num_tokens,
        has_historical_markers: features.has_historical_markers,
        detected_language: features.language,
        features,
        intent_type: None,
        clarify_request: None,
    };

    // 1. Empty or whitespace-only query.
    if stripped.is_empty() {
        return RouterDecision {
            trigger: RouterTrigger::EmptyQuery,
            route: Route::Clarify,
            reasoning: "Query is empty or whitespace-only.".to_string(),
            confidence: 0.0,
            clarify_request: Some(ClarifyRequest::from_empty_query(query)),
            ..base(features)
        };
    }

    // 2. Non-historical intent (creative, coding, chat, opinion).
    if let Some(intent) = patterns::detect_non_historical_intent(lower) {
        return RouterDecision {
            trigger: RouterTrigger::NonHistoricalIntent,
            route: Route::OutOfScope,
            reasoning: format!(
                "Query matches a {} pattern rather than a historical claim.",
                intent.as_str()
            ),
            confidence: 0.95,
            matched_patterns: vec![format!("non_historical_hint:{}", intent.as_str())],
            intent_type: Some(intent),
            ..base(features)
        };
    }

    // 2b. Current events, only when a lookback window is configured.
    let current_events = patterns::current_events_patterns(config.current_events_years_ago);
    if current_events.iter().any(|p| p.is_match(lower)) {
        return RouterDecision {
            trigger: RouterTrigger::CurrentEvents,
            route: Route::OutOfScope,
            reasoning: format!(
                "Query is about current events (within the last {} years), \
                 which this pipeline does not cover.",
                config.current_events_years_ago
            ),
            confidence: 0.9,
            matched_patterns: vec!["current_events".to_string()],
            ..base(features)
        };
    }

    // 3. Underspecified: too short, or a generic truth question.
    let is_generic_truth = patterns::GENERIC_TRUTH_QUESTIONS.contains(&lower);
    if features.num_chars < config.min_query_chars
        || features.num_tokens < config.min_query_words
        || is_generic_truth
    {
        let has_keyword = patterns::contains_historical_keyword(lower);
        return RouterDecision {
            trigger: RouterTrigger::UnderspecifiedQuery,
            route: Route::Clarify,
            reasoning: "Query is too short or generic to identify a specific claim.".to_string(),
            confidence: 0.2,
            matched_patterns: if is_generic_truth {
                vec!["generic_truth_question".to_string()]
            } else {
                vec!["length_threshold".to_string()]
            },
            clarify_request: Some(ClarifyRequest::from_query(
                query,
                ClarifyReasonCode::UnderspecifiedQuery,
                has_keyword,
            )),
            ..base(features)
        };
    }

    // 4. Ambiguous pronoun with no explicit verification framing.
    let is_verification = patterns::is_verification_question(stripped);
    if features.contains_ambiguous_pronoun && !is_verification {
        let has_keyword = patterns::contains_historical_keyword(lower);
        return RouterDecision {
            trigger: RouterTrigger::AmbiguousReference,
            route: Route::Clarify,
            reasoning: "Query refers to 'this/that/it' without naming what it refers to."
                .to_string(),
            confidence: 0.3,
            matched_patterns: vec!["ambiguous_pronoun".to_string()],
            clarify_request: Some(ClarifyRequest::from_query(
                query,
                ClarifyReasonCode::AmbiguousReference,
                has_keyword,
            )),
            ..base(features)
        };
    }

    // 5. Fact-check.
    let (confidence, matched_patterns) = fact_check_confidence(lower, &features, is_verification);
    let (trigger, reasoning) = if is_verification {
        (
            RouterTrigger::ExplicitVerification,
            "Query explicitly asks to verify a claim.".to_string(),
        )
    } else {
        (
            RouterTrigger::DefaultFactCheck,
            "Query looks like a checkable historical question.".to_string(),
        )
    };

    RouterDecision {
        trigger,
        route: Route::FactCheck,
        reasoning,
        confidence,
        matched_patterns,
        ..base(features)
    }
}

/// Additive confidence model for fact-check routes, clamped to 1.0.
fn fact_check_confidence(
    lower: &str,
    features: &QueryFeatures,
    is_verification: bool,
) -> (f32, Vec<String>) {
    let mut confidence: f32 = 0.3;
    let mut matched = Vec::new();

    if is_verification {
        confidence += 0.35;
        matched.push("verification_question".to_string());
        if features.has_historical_markers {
            confidence += 0.2;
            matched.push("verification_with_markers".to_string());
        }
    }

    if !features.year_matches.is_empty() {
        confidence += 0.15;
        matched.push("year_pattern".to_string());
    }

    if patterns::contains_historical_keyword(lower) {
        confidence += 0.15;
        matched.push("historical_keyword".to_string());
    }

    if patterns::is_wh_question(lower) {
        confidence += 0.10;
        matched.push("wh_question".to_string());
    }

    if patterns::starts_with_aux(lower) {
        confidence += 0.10;
        matched.push("auxiliary_start".to_string());
    }

    (confidence.min(1.0), matched)
}
