use std::sync::Arc;

use souq_core::errors::SouqResult;
use souq_core::models::{RetrievalMode, ScoredCandidate};
use souq_core::traits::ICandidateSource;
use tracing::debug;

use super::{RetrievalParams, RetrievalStrategy};

/// Lexical-only retrieval. `final_score` is the raw lexical score.
pub struct KeywordSearch {
    source: Arc<dyn ICandidateSource>,
}

impl KeywordSearch {
    pub fn new(source: Arc<dyn ICandidateSource>) -> Self {
        Self { source }
    }
}

impl RetrievalStrategy for KeywordSearch {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::Keyword
    }

    fn retrieve(
        &self,
        query: &str,
        params: &RetrievalParams<'_>,
    ) -> SouqResult<Vec<ScoredCandidate>> {
        let candidates = self
            .source
            .get_candidates(query, params.k, params.store, false)?;
        debug!(hits = candidates.len(), k = params.k, "keyword retrieval");

        Ok(candidates
            .into_iter()
            .take(params.k)
            .map(|c| {
                let score = c.lexical_score;
                ScoredCandidate::new(c, score)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{product, StaticCandidateSource};

    #[test]
    fn scores_are_raw_lexical() {
        let source = StaticCandidateSource::new([
            product("a").lexical(7.5),
            product("b").lexical(2.0),
        ]);
        let search = KeywordSearch::new(Arc::new(source.clone()));
        let params = RetrievalParams {
            k: 10,
            alpha: 0.5,
            store: Some("noon"),
        };
        let hits = search.retrieve("phone", &params).unwrap();

        assert!(hits.is_empty());
        let call = &source.lexical_calls()[0];
        assert_eq!(call.store.as_deref(), Some("noon"));
        assert!(!call.with_vector);

        let hits = search
            .retrieve("phone", &RetrievalParams { store: None, ..params })
            .unwrap();
        assert_eq!(hits[0].final_score, 7.5);
        assert_eq!(hits[1].final_score, 2.0);
    }
}
