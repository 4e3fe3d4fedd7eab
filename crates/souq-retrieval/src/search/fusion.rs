//! Alpha score fusion: `alpha * vector + (1 - alpha) * lexical`.
//!
//! Raw lexical scores live on an engine-specific open scale, so they are
//! capped and divided by the cap before blending. Vector components are
//! cosine similarities against the stored document vectors.

use souq_core::models::{Candidate, ScoredCandidate};
use tracing::{debug, warn};

use super::similarity::cosine;

/// Lexical component in [0, 1]: `min(raw, cap) / cap`. NaN counts as 0.
pub fn lexical_component(raw: f64, cap: f64) -> f64 {
    if cap <= 0.0 || raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, cap) / cap
}

/// Blend one vector and one lexical component.
pub fn fused_score(alpha: f64, vector: f64, lexical: f64) -> f64 {
    alpha * vector + (1.0 - alpha) * lexical
}

/// Score a lexical pool against an already normalized query vector and
/// return it sorted best first.
///
/// Candidates without a stored vector, or with one of a different length,
/// get a vector component of 0.0.
pub fn fuse(
    pool: Vec<Candidate>,
    query_vector: &[f32],
    alpha: f64,
    lexical_cap: f64,
) -> Vec<ScoredCandidate> {
    let mut missing = 0usize;
    let mut scored: Vec<ScoredCandidate> = pool
        .into_iter()
        .map(|candidate| {
            let vector = match candidate.vector.as_deref() {
                Some(doc) if doc.len() == query_vector.len() => {
                    let similarity = cosine(query_vector, doc);
                    if similarity.is_nan() {
                        debug!(id = %candidate.id, "stored vector is not finite");
                        missing += 1;
                        0.0
                    } else {
                        similarity
                    }
                }
                Some(doc) => {
                    debug!(
                        id = %candidate.id,
                        doc_dim = doc.len(),
                        query_dim = query_vector.len(),
                        "stored vector dimension differs from query"
                    );
                    missing += 1;
                    0.0
                }
                None => {
                    debug!(id = %candidate.id, "candidate has no stored vector");
                    missing += 1;
                    0.0
                }
            };
            let lexical = lexical_component(candidate.lexical_score, lexical_cap);
            let score = fused_score(alpha, vector, lexical);
            ScoredCandidate::new(candidate, score)
        })
        .collect();

    if missing > 0 {
        warn!(
            missing,
            pool = scored.len(),
            "fused without vector similarity for some candidates"
        );
    }

    sort_by_score(&mut scored);
    scored
}

/// Stable sort by `final_score`, highest first. Ties keep input order.
pub fn sort_by_score(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
}
