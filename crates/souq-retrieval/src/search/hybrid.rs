use std::sync::Arc;

use souq_core::config::RetrievalConfig;
use souq_core::errors::SouqResult;
use souq_core::models::{RetrievalMode, ScoredCandidate};
use souq_core::traits::ICandidateSource;
use souq_embeddings::EmbeddingGateway;
use tracing::debug;

use super::fusion;
use super::similarity::l2_normalize;
use super::{RetrievalParams, RetrievalStrategy};

/// Hybrid retrieval: an over-fetched lexical pool re-scored by alpha fusion
/// with cosine similarity against the query embedding.
///
/// With a store scope, fusion runs over an expanded unfiltered pool and the
/// store filter is applied afterwards. Fewer than `k` survivors is a short
/// result, never backfilled.
pub struct HybridSearch {
    source: Arc<dyn ICandidateSource>,
    embeddings: Arc<EmbeddingGateway>,
    pool_multiplier: usize,
    lexical_cap: f64,
    store_pool_multiplier: usize,
    store_min_pool: usize,
}

impl HybridSearch {
    pub fn new(
        source: Arc<dyn ICandidateSource>,
        embeddings: Arc<EmbeddingGateway>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            source,
            embeddings,
            pool_multiplier: config.hybrid_pool_multiplier,
            lexical_cap: config.lexical_score_cap,
            store_pool_multiplier: config.store_filter_pool_multiplier,
            store_min_pool: config.store_filter_min_pool,
        }
    }

    /// Size of the unfiltered fused pool used under a store scope.
    pub fn store_pool_size(&self, k: usize) -> usize {
        k.saturating_mul(self.store_pool_multiplier)
            .max(self.store_min_pool)
    }

    /// Fused top-`k` over the whole collection.
    fn fused(&self, query: &str, k: usize, alpha: f64) -> SouqResult<Vec<ScoredCandidate>> {
        let pool_size = k.saturating_mul(self.pool_multiplier);
        let pool = self.source.get_candidates(query, pool_size, None, true)?;
        if pool.is_empty() {
            debug!(pool_size, "empty lexical pool, skipping embedding");
            return Ok(Vec::new());
        }

        let query_vector = l2_normalize(self.embeddings.embed_query(query)?);
        let mut fused = fusion::fuse(pool, &query_vector, alpha, self.lexical_cap);
        debug!(pool = fused.len(), k, alpha, "hybrid fusion");
        fused.truncate(k);
        Ok(fused)
    }
}

impl RetrievalStrategy for HybridSearch {
    fn mode(&self) -> RetrievalMode {
        RetrievalMode::Hybrid
    }

    fn retrieve(
        &self,
        query: &str,
        params: &RetrievalParams<'_>,
    ) -> SouqResult<Vec<ScoredCandidate>> {
        let Some(store) = params.store else {
            return self.fused(query, params.k, params.alpha);
        };
        if params.k == 0 {
            return Ok(Vec::new());
        }

        let pool_size = self.store_pool_size(params.k);
        let pool = self.fused(query, pool_size, params.alpha)?;
        let pool_len = pool.len();
        let mut scoped: Vec<ScoredCandidate> = pool
            .into_iter()
            .filter(|s| s.candidate.in_store(store))
            .collect();
        scoped.truncate(params.k);

        debug!(
            store,
            pool = pool_len,
            survivors = scoped.len(),
            k = params.k,
            "hybrid store filter"
        );
        Ok(scoped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::{product, FixedEmbedder, StaticCandidateSource};

    fn hybrid(source: &StaticCandidateSource, embedder: FixedEmbedder) -> HybridSearch {
        HybridSearch::new(
            Arc::new(source.clone()),
            Arc::new(EmbeddingGateway::new(Box::new(embedder), 16)),
            &RetrievalConfig::default(),
        )
    }

    fn params(k: usize, alpha: f64, store: Option<&str>) -> RetrievalParams<'_> {
        RetrievalParams { k, alpha, store }
    }

    #[test]
    fn over_fetches_lexical_pool_with_vectors() {
        let source = StaticCandidateSource::new([product("a").lexical(1.0)]);
        let search = hybrid(&source, FixedEmbedder::new(4));
        search.retrieve("q", &params(7, 0.5, None)).unwrap();

        let call = &source.lexical_calls()[0];
        assert_eq!(call.k, 35);
        assert!(call.with_vector);
        assert_eq!(call.store, None);
    }

    #[test]
    fn empty_pool_skips_embedding() {
        let source = StaticCandidateSource::empty();
        let embedder = FixedEmbedder::new(4);
        let search = hybrid(&source, embedder.clone());

        assert!(search.retrieve("q", &params(5, 0.5, None)).unwrap().is_empty());
        assert_eq!(embedder.calls(), 0);
    }

    #[test]
    fn truncates_to_k() {
        let source = StaticCandidateSource::new(
            (0..20).map(|i| product(&format!("p{i}")).lexical(i as f64 / 4.0)),
        );
        let search = hybrid(&source, FixedEmbedder::new(4));
        // Pool of k * 5 = 20 covers the whole corpus.
        let hits = search.retrieve("q", &params(4, 0.0, None)).unwrap();
        assert_eq!(hits.len(), 4);
        assert_eq!(hits[0].candidate.id, "p19");
        assert_eq!(source.lexical_calls()[0].k, 20);
    }

    #[test]
    fn store_scope_fuses_unfiltered_pool() {
        let source = StaticCandidateSource::new([
            product("x1").lexical(5.0).store("extra"),
            product("n1").lexical(1.0).store("Noon"),
        ]);
        let search = hybrid(&source, FixedEmbedder::new(4));
        let hits = search.retrieve("q", &params(10, 0.0, Some("noon"))).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].candidate.id, "n1");
        let call = &source.lexical_calls()[0];
        assert_eq!(call.store, None);
        assert_eq!(call.k, 200 * 5);
    }

    #[test]
    fn store_pool_has_floor() {
        let source = StaticCandidateSource::empty();
        let search = hybrid(&source, FixedEmbedder::new(4));
        assert_eq!(search.store_pool_size(10), 200);
        assert_eq!(search.store_pool_size(100), 400);
    }
}
