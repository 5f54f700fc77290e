//! Domain types for the fact-checking pipeline.

pub mod clarify;
pub mod config;
pub mod evidence;
pub mod router;
pub mod search;
pub mod writer;
