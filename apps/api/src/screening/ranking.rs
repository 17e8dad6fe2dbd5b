use crate::models::{CandidateAnalysis, DocumentOutcome};

pub const MIN_TOP_N: usize = 1;
pub const MAX_TOP_N: usize = 50;
pub const DEFAULT_TOP_N: usize = 3;

pub fn clamp_top_n(top_n: usize) -> usize {
    top_n.clamp(MIN_TOP_N, MAX_TOP_N)
}

/// Analyzed candidates ordered by ATS score, highest first.
///
/// The sort is stable, so equal scores keep upload order. Failed documents
/// are left out; the caller reports them separately.
pub fn rank_candidates(outcomes: &[DocumentOutcome]) -> Vec<CandidateAnalysis> {
    let mut ranked: Vec<CandidateAnalysis> = outcomes
        .iter()
        .filter_map(|o| match o {
            DocumentOutcome::Analyzed(analysis) => Some(analysis.as_ref().clone()),
            DocumentOutcome::Failed { .. } => None,
        })
        .collect();
    ranked.sort_by(|a, b| b.ats.score.total_cmp(&a.ats.score));
    ranked
}

/// The first `top_n` (clamped to 1-50) of an already ranked list.
pub fn shortlist(ranked: &[CandidateAnalysis], top_n: usize) -> &[CandidateAnalysis] {
    let n = clamp_top_n(top_n).min(ranked.len());
    &ranked[..n]
}
