//! Evidence analysis: claim extraction, credibility ordering, per-pair
//! evaluation, and verdict aggregation.
//!
//! The analyst turns raw search results into an [`EvidenceBundle`]:
//!
//! 1. Extract atomic claims from the query (model call, soft-fails to the
//!    query itself).
//! 2. Score and sort results by source credibility, descending.
//! 3. Assign evidence IDs (`E1` = most credible) after the sort, so IDs are
//!    stable before any concurrent work begins.
//! 4. Evaluate each (claim, evidence) pair, concurrently per claim, capped
//!    at the top-N evidence items.
//! 5. Aggregate pair verdicts into per-claim findings and one overall
//!    verdict.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::pipeline::credibility::SourceCredibilityScorer;
use crate::traits::ai::AI;
use crate::types::config::PipelineConfig;
use crate::types::evidence::{
    EvidenceBundle, EvidenceItem, EvidenceVerdict, Finding, PairEvaluation, PairVerdict,
};
use crate::types::search::SearchResult;

/// Maximum number of atomic claims evaluated per query.
const MAX_CLAIMS: usize = 5;

/// An evidence bundle plus analysis statistics for observability.
#[derive(Debug, Clone)]
pub struct EvidenceAnalysis {
    /// The synthesized evidence bundle.
    pub bundle: EvidenceBundle,

    /// Number of atomic claims evaluated.
    pub claims_extracted: usize,

    /// Mean raw credibility score across all scored results.
    pub avg_credibility: f32,

    /// Display domain of the most credible source, if any.
    pub top_source_domain: Option<String>,
}

impl EvidenceAnalysis {
    fn empty() -> Self {
        Self {
            bundle: EvidenceBundle::empty(),
            claims_extracted: 0,
            avg_credibility: 0.0,
            top_source_domain: None,
        }
    }
}

/// Aggregate per-pair evaluations into one verdict for a claim.
///
/// Support and contradiction together mean `Contested` (supporting IDs
/// listed first); only one side means that side's verdict; neither means
/// `Insufficient` with no evidence IDs. Irrelevant evaluations are ignored.
pub fn aggregate_verdicts(
    evaluations: &[(String, PairEvaluation)],
) -> (EvidenceVerdict, Vec<String>) {
    let mut supported_ids: Vec<String> = vec![];
    let mut not_supported_ids: Vec<String> = vec![];

    for (evidence_id, eval) in evaluations {
        debug_assert!(
            crate::types::evidence::is_valid_evidence_id(evidence_id),
            "malformed evidence id: {evidence_id:?}"
        );
        match eval.verdict {
            PairVerdict::Supported => supported_ids.push(evidence_id.clone()),
            PairVerdict::NotSupported => not_supported_ids.push(evidence_id.clone()),
            PairVerdict::Irrelevant => {}
        }
    }

    match (!supported_ids.is_empty(), !not_supported_ids.is_empty()) {
        (true, true) => {
            supported_ids.extend(not_supported_ids);
            (EvidenceVerdict::Contested, supported_ids)
        }
        (true, false) => (EvidenceVerdict::Supported, supported_ids),
        (false, true) => (EvidenceVerdict::NotSupported, not_supported_ids),
        (false, false) => (EvidenceVerdict::Insufficient, vec![]),
    }
}

/// Synthesize the overall verdict from all claim findings.
///
/// Priority order: `Contested` > `NotSupported` > `Supported` >
/// `Insufficient`. All claims must be supported for an overall `Supported`.
/// No findings at all means `Insufficient`.
pub fn synthesize_overall_verdict(findings: &[Finding]) -> EvidenceVerdict {
    if findings.is_empty() {
        return EvidenceVerdict::Insufficient;
    }

    if findings
        .iter()
        .any(|f| f.verdict == EvidenceVerdict::Contested)
    {
        return EvidenceVerdict::Contested;
    }

    if findings
        .iter()
        .any(|f| f.verdict == EvidenceVerdict::NotSupported)
    {
        return EvidenceVerdict::NotSupported;
    }

    if findings
        .iter()
        .all(|f| f.verdict == EvidenceVerdict::Supported)
    {
        return EvidenceVerdict::Supported;
    }

    EvidenceVerdict::Insufficient
}

/// Run the full analysis over search results for a query.
///
/// Never fails: model errors degrade to conservative per-pair verdicts or to
/// treating the whole query as the single claim, and an empty result set
/// yields an empty `Insufficient` bundle.
pub async fn synthesize_evidence<A: AI + ?Sized>(
    ai: &A,
    query: &str,
    results: &[SearchResult],
    config: &PipelineConfig,
) -> EvidenceAnalysis {
    if results.is_empty() {
        warn!(query, "no search results to analyze");
        return EvidenceAnalysis::empty();
    }

    let mut claims = match ai.extract_claims(query).await {
        Ok(claims) => claims,
        Err(e) => {
            warn!(error = %e, "claim extraction failed, using original query");
            vec![query.to_string()]
        }
    };
    if claims.is_empty() {
        claims = vec![query.to_string()];
    }
    claims.truncate(MAX_CLAIMS);
    info!(count = claims.len(), "extracted claims");

    let scorer = SourceCredibilityScorer::new();
    let mut scored: Vec<(&SearchResult, u8, f32)> = results
        .iter()
        .map(|r| {
            let score = scorer.score(r);
            (r, score, scorer.normalize(score))
        })
        .collect();
    // Stable sort: equal scores keep search-rank order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let evidence_items: Vec<EvidenceItem> = scored
        .iter()
        .enumerate()
        .map(|(idx, (result, _, _))| EvidenceItem {
            id: format!("E{}", idx + 1),
            title: result.title.clone(),
            snippet: result.snippet.clone(),
            url: result.url.clone(),
            display_domain: result.display_domain.clone(),
        })
        .collect();

    // IDs are fixed before any concurrent evaluation starts.
    let top_n = config.top_evidence_limit.min(evidence_items.len());
    let top_pairs: Vec<(&EvidenceItem, f32)> = evidence_items[..top_n]
        .iter()
        .zip(scored[..top_n].iter().map(|(_, _, cred)| *cred))
        .collect();

    let mut findings: Vec<Finding> = Vec::with_capacity(claims.len());
    for claim in &claims {
        let evaluations: Vec<(String, PairEvaluation)> =
            join_all(top_pairs.iter().map(|(item, credibility)| async move {
                let eval = match ai
                    .evaluate_evidence(claim, &item.snippet, *credibility)
                    .await
                {
                    Ok(eval) => eval,
                    Err(e) => {
                        warn!(error = %e, evidence_id = %item.id, "per-pair evaluation failed");
                        PairEvaluation {
                            verdict: PairVerdict::Irrelevant,
                            confidence: 0.5,
                            reasoning: format!(
                                "Evaluation error: {}",
                                e.to_string().chars().take(50).collect::<String>()
                            ),
                        }
                    }
                };
                (item.id.clone(), eval)
            }))
            .await;

        let (verdict, evidence_ids) = aggregate_verdicts(&evaluations);
        debug!(claim = %claim, verdict = verdict.as_str(), ?evidence_ids, "claim finding");
        findings.push(Finding {
            claim: claim.clone(),
            verdict,
            evidence_ids,
        });
    }

    let overall_verdict = synthesize_overall_verdict(&findings);
    info!(verdict = overall_verdict.as_str(), "analysis complete");

    let avg_credibility =
        scored.iter().map(|(_, s, _)| *s as f32).sum::<f32>() / scored.len() as f32;
    let top_source_domain = scored.first().map(|(r, _, _)| r.display_domain.clone());

    EvidenceAnalysis {
        bundle: EvidenceBundle {
            evidence_items,
            findings,
            overall_verdict,
        },
        claims_extracted: claims.len(),
        avg_credibility,
        top_source_domain,
    }
}
