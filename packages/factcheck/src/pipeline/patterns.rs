//! Pattern tables and helpers for query classification.
//!
//! Centralizes the regexes, keyword lists, and phrase buckets used by the
//! router. All matching is pure: no state, no I/O, no failure modes.

use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;

use crate::types::router::IntentKind;

/// Phrases that mark a query as creative writing.
const CREATIVE_HINTS: &[&str] = &[
    "write me a poem",
    "poem about",
    "song about",
    "lyrics about",
    "short story",
    "story about",
    "screenplay",
    "script for",
];

/// Phrases that mark a query as a coding request.
const CODING_HINTS: &[&str] = &[
    "python code",
    "python script",
    "python function",
    "write a python",
    "write a function",
    "write code",
    "code this",
    "bash script",
    "shell script",
    "powershell script",
    "dockerfile",
    "docker compose",
    "sql query",
    "regex for",
    "javascript function",
    "java function",
];

/// Phrases that mark a query as casual chat.
const CHAT_HINTS: &[&str] = &[
    "tell me a joke",
    "make me laugh",
    "roast me",
    "pick up line",
    "pickup line",
    "dating advice",
    "relationship advice",
    "life advice",
];

/// Phrases that mark a query as an opinion request.
const OPINION_HINTS: &[&str] = &[
    "what's the best",
    "what is the best",
    "what's your favorite",
    "what is your favorite",
    "what's your favourite",
    "what is your favourite",
    "which is better",
    "which one is better",
    "do you prefer",
    "what do you think about",
    "what do you think of",
    "what's your opinion",
    "what is your opinion",
    "should i",
    "would you recommend",
    "what would you recommend",
    "top 10",
    "top ten",
    "best way to",
    "worst thing about",
    "favorite thing about",
    "favourite thing about",
];

/// Intent buckets in match-priority order. First bucket with a hit wins.
const INTENT_BUCKETS: &[(IntentKind, &[&str])] = &[
    (IntentKind::CreativeRequest, CREATIVE_HINTS),
    (IntentKind::CodingRequest, CODING_HINTS),
    (IntentKind::ChatRequest, CHAT_HINTS),
    (IntentKind::OpinionRequest, OPINION_HINTS),
];

/// Generic truth questions that need clarification on their own.
pub const GENERIC_TRUTH_QUESTIONS: &[&str] = &[
    "did it happen?",
    "is it true?",
    "is that true?",
    "is this true?",
];

/// Keywords that suggest a historical entity or period.
pub const HISTORICAL_KEYWORDS: &[&str] = &[
    // Political
    "president",
    "king",
    "queen",
    "emperor",
    "pharaoh",
    "sultan",
    "chancellor",
    "prime minister",
    "dictator",
    "monarch",
    // Military
    "war",
    "battle",
    "siege",
    "invasion",
    "conquest",
    "crusade",
    "army",
    "navy",
    "general",
    "admiral",
    // Time periods
    "century",
    "era",
    "period",
    "age",
    "dynasty",
    "reign",
    "ancient",
    "medieval",
    "renaissance",
    // Events
    "revolution",
    "independence",
    "declaration",
    "treaty",
    "assassination",
    "coronation",
    // Institutions
    "empire",
    "kingdom",
    "republic",
    "confederation",
    "constitution",
    "parliament",
    "senate",
];

/// Year detection: a 3-4 digit number, optionally followed by an era suffix.
pub static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{3,4}(\s+(AD|BC|CE|BCE))?\b").unwrap());

static HEBREW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{0590}-\u{05FF}]").unwrap());

static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(when|what|who|where|why|how|did|was|were|is|are|can|could|would|should)\b",
    )
    .unwrap()
});

static WH_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(who|what|when|where|how|why)\b").unwrap());

static AUX_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(did|was|were|is|are)\b").unwrap());

/// Explicit verification requests ("is it true", "did X really happen", ...).
static VERIFICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b(is it true|true or false|fact or fiction)\b").unwrap(),
        Regex::new(r"(?i)^(is|was|were|did)\b.*\b(true|correct|accurate|real|actually)\b")
            .unwrap(),
        Regex::new(r"(?i)^(verify|confirm|check)\b.*\b(that|whether|if)\b").unwrap(),
        Regex::new(r"(?i)^did\b.*\breally\b").unwrap(),
    ]
});

/// Detect query language: Hebrew ("he") if any Hebrew character, else
/// English ("en").
pub fn contains_hebrew(query: &str) -> bool {
    HEBREW_PATTERN.is_match(query)
}

/// Whether the stripped query opens like a question.
pub fn starts_like_question(stripped: &str) -> bool {
    QUESTION_START.is_match(stripped)
}

/// Whether the query is a WH-question (who/what/when/where/how/why).
pub fn is_wh_question(stripped: &str) -> bool {
    WH_QUESTION.is_match(stripped)
}

/// Whether the query starts with a yes/no auxiliary (did/was/were/is/are).
pub fn starts_with_aux(stripped: &str) -> bool {
    AUX_START.is_match(stripped)
}

/// Whether the query is an explicit verification request.
pub fn is_verification_question(query: &str) -> bool {
    VERIFICATION_PATTERNS.iter().any(|p| p.is_match(query))
}

/// Whether the lowercased query contains a historical keyword.
pub fn contains_historical_keyword(query_lower: &str) -> bool {
    HISTORICAL_KEYWORDS.iter().any(|k| query_lower.contains(k))
}

/// Whether the query carries historical markers: a year pattern or a
/// historical keyword.
pub fn has_historical_markers(query: &str) -> bool {
    YEAR_PATTERN.is_match(query) || contains_historical_keyword(&query.to_lowercase())
}

/// Detect a non-historical intent bucket, first match wins.
pub fn detect_non_historical_intent(query_lower: &str) -> Option<IntentKind> {
    INTENT_BUCKETS
        .iter()
        .find(|(_, hints)| hints.iter().any(|h| query_lower.contains(h)))
        .map(|(kind, _)| *kind)
}

/// Build current-events patterns for the configured window.
///
/// `years_ago` = 0 disables current-events filtering entirely.
pub fn current_events_patterns(years_ago: u32) -> Vec<Regex> {
    if years_ago == 0 {
        return vec![];
    }

    let current_year = Utc::now().year();
    let recent_years: Vec<String> = (current_year - years_ago as i32..=current_year)
        .map(|y| y.to_string())
        .collect();

    vec![
        Regex::new(r"(?i)\b(latest|recent|now|current|breaking|trending)\b").unwrap(),
        Regex::new(&format!(r"\b({})\b", recent_years.join("|"))).unwrap(),
        Regex::new(r"(?i)\b(stock|bitcoin|weather|sports score)\b").unwrap(),
    ]
}
