use std::sync::Arc;

use souq_core::errors::SouqResult;
use souq_core::models::{RetrievalMode, ScoredCandidate};
use souq_core::traits::ICandidateSource;
use souq_embeddings::EmbeddingGateway;
use tracing::debug;

use super::similarity::l2_normalize;
use super::{RetrievalParams, RetrievalStrategy};

/// Nearest-neighbour retrieval on the normalized query embedding.
/// `final_score` is the store's similarity (`1 - distance`).
pub struct VectorSearch {
    source: Arc<dyn ICandidateSource>,
    embeddings: Arc<EmbeddingGateway>,
}

impl VectorSearch {
    pub fn new(source: Arc<dyn ICandidateSource>, embeddings: Arc<EmbeddingGateway>) -> Self {
        Self { source, embeddings }
    }
}

impl RetrievalStrategy for VectorSearch {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::Vector
    }

    fn retrieve(
        &self,
        query: &str,
        params: &RetrievalParams<'_>,
    ) -> SouqResult<Vec<ScoredCandidate>> {
        let query_vector = l2_normalize(self.embeddings.embed_query(query)?);
        let candidates = self
            .source
            .vector_search(&query_vector, params.k, params.store)?;
        debug!(hits = candidates.len(), k = params.k, "vector retrieval");

        Ok(candidates
            .into_iter()
            .take(params.k)
            .map(|c| {
                let score = c.similarity.unwrap_or(0.0);
                ScoredCandidate::new(c, score)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{product, FixedEmbedder, StaticCandidateSource};

    #[test]
    fn scores_are_similarity_and_query_is_normalized() {
        let embedder = FixedEmbedder::new(2).map("red dress", vec![3.0, 4.0]);
        let gateway = Arc::new(EmbeddingGateway::new(Box::new(embedder), 16));
        let source = StaticCandidateSource::new([
            product("match").vector(vec![0.6, 0.8]),
            product("other").vector(vec![-0.8, 0.6]),
            product("no-vector"),
        ]);
        let search = VectorSearch::new(Arc::new(source.clone()), gateway);

        let hits = search
            .retrieve(
                "red dress",
                &RetrievalParams {
                    k: 5,
                    alpha: 0.5,
                    store: None,
                },
            )
            .unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].candidate.id, "match");
        assert!((hits[0].final_score - 1.0).abs() < 1e-6);
        assert_eq!(source.vector_calls()[0].dim, 2);
    }
}
