//! EmbeddingGateway: the single entry point for query embeddings.
//!
//! Wraps one provider, pins the embedding dimension on the first successful
//! call, and caches single-query embeddings.

use std::sync::OnceLock;

use souq_core::config::EmbeddingConfig;
use souq_core::errors::{EmbeddingError, SouqResult};
use souq_core::traits::IEmbeddingProvider;
use tracing::{debug, error, info};

use crate::cache::QueryCache;
use crate::providers;

/// Provider-agnostic embedding gateway.
///
/// The dimension cell is written at most once. Two racing first calls can
/// both reach `get_or_init`; only one value is stored and both observe it,
/// so a backend that changes model between those calls is still caught.
pub struct EmbeddingGateway {
    provider: Box<dyn IEmbeddingProvider>,
    dimension: OnceLock<usize>,
    cache: QueryCache,
}

impl EmbeddingGateway {
    pub fn new(provider: Box<dyn IEmbeddingProvider>, cache_size: u64) -> Self {
        info!(provider = provider.name(), cache_size, "EmbeddingGateway initialized");
        Self {
            provider,
            dimension: OnceLock::new(),
            cache: QueryCache::new(cache_size),
        }
    }

    /// Build the configured HTTP provider and wrap it.
    pub fn from_config(config: &EmbeddingConfig) -> SouqResult<Self> {
        let provider = providers::create_provider(config)?;
        Ok(Self::new(provider, config.l1_cache_size))
    }

    /// Embed a batch of texts, one vector per text, in order.
    ///
    /// An empty batch returns immediately without calling the provider.
    /// Any vector whose length differs from the pinned dimension is a fatal
    /// `DimensionMismatch`; vectors are never truncated or padded.
    pub fn embed(&self, texts: &[String]) -> SouqResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.provider.embed_batch(texts)?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "{} returned {} vectors for {} inputs",
                    self.provider.name(),
                    vectors.len(),
                    texts.len()
                ),
            }
            .into());
        }

        self.check_dimensions(&vectors)?;
        debug!(count = vectors.len(), "embedded batch");
        Ok(vectors)
    }

    /// Embed one query, served from the cache when possible.
    pub fn embed_query(&self, text: &str) -> SouqResult<Vec<f32>> {
        let key = QueryCache::key_for(text);
        if let Some(vector) = self.cache.get(&key) {
            debug!("query embedding cache hit");
            return Ok(vector);
        }

        let vector = self
            .embed(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "empty response".to_string(),
            })?;
        self.cache.insert(key, vector.clone());
        Ok(vector)
    }

    /// The process-wide embedding dimension.
    ///
    /// Fails until the first successful `embed` call.
    pub fn dim(&self) -> SouqResult<usize> {
        self.dimension
            .get()
            .copied()
            .ok_or_else(|| EmbeddingError::DimensionUnknown.into())
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn check_dimensions(&self, vectors: &[Vec<f32>]) -> Result<(), EmbeddingError> {
        let Some(first) = vectors.first() else {
            return Ok(());
        };
        let actual = first.len();
        if actual == 0 {
            return Err(EmbeddingError::InferenceFailed {
                reason: "provider returned an empty vector".to_string(),
            });
        }
        // The batch must agree with itself before it may pin the dimension.
        if let Some(bad) = vectors.iter().find(|v| v.len() != actual) {
            return Err(mismatch(actual, bad.len()));
        }

        let expected = *self.dimension.get_or_init(|| {
            info!(dim = actual, "embedding dimension detected");
            actual
        });
        if expected != actual {
            return Err(mismatch(expected, actual));
        }
        Ok(())
    }
}

fn mismatch(expected: usize, actual: usize) -> EmbeddingError {
    error!(
        expected,
        actual, "embedding dimension drift: backend model changed underneath the service"
    );
    EmbeddingError::DimensionMismatch { expected, actual }
}
