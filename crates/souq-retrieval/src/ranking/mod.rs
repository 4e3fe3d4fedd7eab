//! Cross-encoder reranking: score → stable reorder → threshold.
//!
//! Rerank scores order and filter results; they are never blended into the
//! retrieval score.

#[cfg(feature = "reranker")]
pub mod fastembed;
pub mod http;

use std::sync::Arc;
use std::time::Instant;

use souq_core::errors::{RerankError, SouqResult};
use souq_core::models::ScoredCandidate;
use souq_core::traits::ICrossEncoder;
use tracing::debug;

#[cfg(feature = "reranker")]
pub use self::fastembed::FastembedCrossEncoder;
pub use http::HttpCrossEncoder;

/// Reranks retrieved candidates with a shared cross-encoder.
#[derive(Clone)]
pub struct Reranker {
    encoder: Arc<dyn ICrossEncoder>,
    candidate_limit: usize,
}

impl Reranker {
    pub fn new(encoder: Arc<dyn ICrossEncoder>) -> Self {
        Self {
            encoder,
            candidate_limit: 0,
        }
    }

    /// Only the first `limit` candidates are sent to the model (0 = all).
    pub fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = limit;
        self
    }

    pub fn model_name(&self) -> &str {
        self.encoder.name()
    }

    /// Attach rerank scores and sort by them, highest first.
    ///
    /// One batched model call. Ties keep retrieval order. Candidates beyond
    /// the candidate limit stay unscored and sort after every scored one.
    pub fn rerank(
        &self,
        query: &str,
        mut candidates: Vec<ScoredCandidate>,
    ) -> SouqResult<Vec<ScoredCandidate>> {
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let start = Instant::now();
        let scored_len = match self.candidate_limit {
            0 => candidates.len(),
            limit => limit.min(candidates.len()),
        };
        let documents: Vec<&str> = candidates[..scored_len]
            .iter()
            .map(|s| s.candidate.document_text())
            .collect();

        let scores = self.encoder.score_pairs(query, &documents)?;
        if scores.len() != documents.len() {
            return Err(RerankError::ScoreCountMismatch {
                expected: documents.len(),
                actual: scores.len(),
            }
            .into());
        }

        // A NaN score is treated as unscored.
        for (candidate, score) in candidates.iter_mut().zip(scores) {
            candidate.rerank_score = (!score.is_nan()).then_some(score);
        }
        candidates.sort_by(|a, b| rank_key(b).total_cmp(&rank_key(a)));

        debug!(
            model = self.encoder.name(),
            scored = scored_len,
            total = candidates.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "reranked"
        );
        Ok(candidates)
    }
}

/// Drop candidates whose rerank score is below `threshold`, keeping order.
/// A threshold of exactly 0.0 disables filtering.
pub fn apply_threshold(candidates: Vec<ScoredCandidate>, threshold: f64) -> Vec<ScoredCandidate> {
    if threshold == 0.0 {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|s| rank_key(s) >= threshold)
        .collect()
}

fn rank_key(candidate: &ScoredCandidate) -> f64 {
    candidate.rerank_score.unwrap_or(f64::NEG_INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use souq_core::models::Candidate;
    use test_fixtures::ScriptedCrossEncoder;

    fn scored(id: &str, text: &str, score: f64) -> ScoredCandidate {
        let mut c = Candidate::new(id);
        c.combined_text = Some(text.to_string());
        ScoredCandidate::new(c, score)
    }

    fn ids(candidates: &[ScoredCandidate]) -> Vec<&str> {
        candidates.iter().map(|s| s.candidate.id.as_str()).collect()
    }

    #[test]
    fn reorders_by_rerank_score_and_keeps_retrieval_score() {
        let encoder = ScriptedCrossEncoder::new(&[("a", 0.1), ("b", 0.9), ("c", 0.5)]);
        let reranker = Reranker::new(Arc::new(encoder.clone()));
        let out = reranker
            .rerank("q", vec![scored("1", "a", 0.9), scored("2", "b", 0.8), scored("3", "c", 0.7)])
            .unwrap();

        assert_eq!(ids(&out), vec!["2", "3", "1"]);
        assert_eq!(out[0].final_score, 0.8);
        assert_eq!(out[0].rerank_score, Some(0.9));
        assert_eq!(encoder.batches().len(), 1);
    }

    #[test]
    fn ties_keep_retrieval_order() {
        let encoder = ScriptedCrossEncoder::new(&[]).with_default(0.5);
        let reranker = Reranker::new(Arc::new(encoder));
        let out = reranker
            .rerank("q", vec![scored("1", "a", 0.9), scored("2", "b", 0.8), scored("3", "c", 0.7)])
            .unwrap();
        assert_eq!(ids(&out), vec!["1", "2", "3"]);
    }

    #[test]
    fn nan_rerank_score_sorts_last_as_unscored() {
        let encoder = ScriptedCrossEncoder::new(&[("a", 0.2), ("b", f64::NAN), ("c", 0.7)]);
        let reranker = Reranker::new(Arc::new(encoder));
        let out = reranker
            .rerank("q", vec![scored("1", "a", 0.9), scored("2", "b", 0.8), scored("3", "c", 0.7)])
            .unwrap();
        assert_eq!(ids(&out), vec!["3", "1", "2"]);
        assert_eq!(out[2].rerank_score, None);
    }

    #[test]
    fn empty_input_skips_model() {
        let encoder = ScriptedCrossEncoder::new(&[]);
        let reranker = Reranker::new(Arc::new(encoder.clone()));
        assert!(reranker.rerank("q", Vec::new()).unwrap().is_empty());
        assert!(encoder.batches().is_empty());
    }

    #[test]
    fn falls_back_to_title_text() {
        let encoder = ScriptedCrossEncoder::new(&[]);
        let reranker = Reranker::new(Arc::new(encoder.clone()));
        let mut c = Candidate::new("1");
        c.title_en = Some("Galaxy S24".into());
        reranker
            .rerank("q", vec![ScoredCandidate::new(c, 1.0), ScoredCandidate::new(Candidate::new("2"), 0.5)])
            .unwrap();
        assert_eq!(encoder.batches()[0], vec!["Galaxy S24".to_string(), String::new()]);
    }

    #[test]
    fn candidate_limit_leaves_tail_in_order() {
        let encoder = ScriptedCrossEncoder::new(&[("a", 0.2), ("b", 0.7)]).with_default(0.9);
        let reranker = Reranker::new(Arc::new(encoder.clone())).with_candidate_limit(2);
        let out = reranker
            .rerank(
                "q",
                vec![
                    scored("1", "a", 0.9),
                    scored("2", "b", 0.8),
                    scored("3", "c", 0.7),
                    scored("4", "d", 0.6),
                ],
            )
            .unwrap();

        assert_eq!(ids(&out), vec!["2", "1", "3", "4"]);
        assert_eq!(encoder.batches()[0].len(), 2);
        assert_eq!(out[2].rerank_score, None);
    }

    #[test]
    fn score_count_mismatch_is_error() {
        struct Short;
        impl ICrossEncoder for Short {
            fn score_pairs(&self, _: &str, _: &[&str]) -> SouqResult<Vec<f64>> {
                Ok(vec![1.0])
            }
            fn name(&self) -> &str {
                "short"
            }
        }
        let err = Reranker::new(Arc::new(Short))
            .rerank("q", vec![scored("1", "a", 1.0), scored("2", "b", 1.0)])
            .unwrap_err();
        assert!(matches!(
            err,
            souq_core::SouqError::RerankError(RerankError::ScoreCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn threshold_drops_low_scores_and_keeps_order() {
        let mut input = vec![scored("1", "a", 0.1), scored("2", "b", 0.2), scored("3", "c", 0.3)];
        input[0].rerank_score = Some(0.9);
        input[1].rerank_score = Some(0.6);
        input[2].rerank_score = Some(0.59);
        let out = apply_threshold(input, 0.6);
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let mut input = vec![scored("1", "a", 0.1)];
        input[0].rerank_score = Some(-3.0);
        assert_eq!(apply_threshold(input, 0.0).len(), 1);
    }

    #[test]
    fn negative_threshold_filters_unscored_tail() {
        let mut input = vec![scored("1", "a", 0.1), scored("2", "b", 0.1)];
        input[0].rerank_score = Some(-2.0);
        let out = apply_threshold(input, -5.0);
        assert_eq!(ids(&out), vec!["1"]);
    }
}
