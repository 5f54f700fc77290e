//! Typed errors for the fact-checking library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Collaborator failures (LLM calls, search, cache) are modelled as values so
//! the pipeline can branch on them explicitly and substitute conservative
//! fallbacks instead of unwinding.

use thiserror::Error;

/// Errors that can occur during fact-checking operations.
#[derive(Debug, Error)]
pub enum FactCheckError {
    /// Search provider failed
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    /// AI collaborator unavailable or failed
    #[error("AI service error: {0}")]
    Ai(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Cache read/write failed
    #[error("cache error: {0}")]
    Cache(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Collaborator returned a verdict string outside the known vocabulary
    #[error("unknown verdict value: {value:?}")]
    UnknownVerdict { value: String },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors that can occur while querying a search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider rejected the request (quota, auth, malformed query)
    #[error("provider error: {status}: {message}")]
    Provider { status: u16, message: String },

    /// Provider response could not be decoded
    #[error("malformed provider response: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Search query was empty
    #[error("search query cannot be empty")]
    EmptyQuery,
}

/// Result type alias for fact-checking operations.
pub type Result<T> = std::result::Result<T, FactCheckError>;
