//! Core trait abstractions for external collaborators.
//!
//! The pipeline's only I/O happens through these seams: an LLM collaborator
//! ([`ai::AI`]), a search provider ([`searcher::WebSearcher`]), and a result
//! cache ([`cache::ResultCache`]). Everything else is pure.

pub mod ai;
pub mod cache;
pub mod searcher;
