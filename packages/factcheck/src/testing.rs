//! Test doubles for the pipeline's collaborator traits.
//!
//! [`MockAI`] scripts the three model calls; pair it with
//! [`crate::traits::searcher::MockWebSearcher`] and
//! [`crate::traits::cache::NoCache`] to exercise the full pipeline without
//! network access.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{FactCheckError, Result};
use crate::traits::ai::AI;
use crate::types::evidence::{PairEvaluation, PairVerdict};

/// Scriptable AI for tests.
///
/// Unscripted calls return permissive defaults: claim extraction echoes the
/// query, evaluation returns `Irrelevant` at 0.5, and generation returns a
/// fixed uncited sentence (which exercises the citation fallback).
#[derive(Default)]
pub struct MockAI {
    claims: HashMap<String, Vec<String>>,
    evaluations: HashMap<(String, String), PairEvaluation>,
    answer: Option<String>,
    fail_claims: bool,
    fail_evaluation: bool,
    fail_generation: bool,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the claims returned for a query.
    pub fn with_claims(mut self, query: &str, claims: &[&str]) -> Self {
        self.claims
            .insert(query.to_string(), claims.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Script the evaluation for a specific (claim, snippet) pair.
    pub fn with_evaluation(
        mut self,
        claim: &str,
        snippet: &str,
        verdict: PairVerdict,
        confidence: f32,
    ) -> Self {
        self.evaluations.insert(
            (claim.to_string(), snippet.to_string()),
            PairEvaluation {
                verdict,
                confidence,
                reasoning: "scripted evaluation".to_string(),
            },
        );
        self
    }

    /// Script the raw generator output (JSON or plain text).
    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = Some(answer.to_string());
        self
    }

    /// Make claim extraction fail.
    pub fn failing_claims(mut self) -> Self {
        self.fail_claims = true;
        self
    }

    /// Make per-pair evaluation fail.
    pub fn failing_evaluation(mut self) -> Self {
        self.fail_evaluation = true;
        self
    }

    /// Make answer generation fail.
    pub fn failing_generation(mut self) -> Self {
        self.fail_generation = true;
        self
    }

    fn failure(what: &str) -> FactCheckError {
        FactCheckError::Ai(Box::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("mock {what} failure"),
        )))
    }
}

#[async_trait]
impl AI for MockAI {
    async fn extract_claims(&self, query: &str) -> Result<Vec<String>> {
        if self.fail_claims {
            return Err(Self::failure("claim extraction"));
        }
        Ok(self
            .claims
            .get(query)
            .cloned()
            .unwrap_or_else(|| vec![query.to_string()]))
    }

    async fn evaluate_evidence(
        &self,
        claim: &str,
        snippet: &str,
        _credibility: f32,
    ) -> Result<PairEvaluation> {
        if self.fail_evaluation {
            return Err(Self::failure("evaluation"));
        }
        Ok(self
            .evaluations
            .get(&(claim.to_string(), snippet.to_string()))
            .cloned()
            .unwrap_or(PairEvaluation {
                verdict: PairVerdict::Irrelevant,
                confidence: 0.5,
                reasoning: "no scripted evaluation".to_string(),
            }))
    }

    async fn generate_answer(&self, _prompt: &str) -> Result<String> {
        if self.fail_generation {
            return Err(Self::failure("generation"));
        }
        Ok(self
            .answer
            .clone()
            .unwrap_or_else(|| "No scripted answer.".to_string()))
    }
}
