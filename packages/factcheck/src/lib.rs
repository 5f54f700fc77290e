//! Evidence-grounded fact checking for historical claims.
//!
//! The crate routes a raw user query, researches it through a pluggable web
//! searcher, synthesizes a credibility-ordered evidence bundle with an LLM
//! collaborator, and writes a cited answer whose citations are validated
//! against the evidence before it is returned.
//!
//! # Example
//!
//! ```no_run
//! use factcheck::pipeline::{CheckOutcome, Pipeline};
//! use factcheck::testing::MockAI;
//! use factcheck::traits::cache::NoCache;
//! use factcheck::traits::searcher::MockWebSearcher;
//!
//! # async fn run() {
//! let pipeline = Pipeline::new(MockAI::new(), MockWebSearcher::new(), NoCache);
//! let report = pipeline.check("Did the Berlin Wall fall in 1989?").await;
//!
//! match report.outcome {
//!     CheckOutcome::Report { writer, .. } => println!("{}", writer.answer),
//!     CheckOutcome::Clarify(request) => println!("{}", request.message),
//!     CheckOutcome::OutOfScope { .. } => println!("not a historical fact-check"),
//! }
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`pipeline`] - the staged pipeline: router, research, analyst, writer
//! - [`traits`] - collaborator traits: [`traits::ai::AI`],
//!   [`traits::searcher::WebSearcher`], [`traits::cache::ResultCache`]
//! - [`types`] - value objects shared across stages
//! - [`stores`] - cache implementations (memory, file)
//! - [`testing`] - scriptable mocks for the collaborator traits

pub mod error;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

pub use error::{FactCheckError, Result, SearchError};
pub use pipeline::{CheckOutcome, CheckReport, Pipeline};
pub use types::clarify::ClarifyRequest;
pub use types::config::{PipelineConfig, RouterConfig};
pub use types::evidence::{EvidenceBundle, EvidenceVerdict};
pub use types::router::{Route, RouterDecision};
pub use types::writer::WriterOutput;
