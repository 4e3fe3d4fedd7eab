use crate::errors::SouqResult;

/// Embedding backend. Returns raw (not normalized) vectors.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per text, same order.
    fn embed_batch(&self, texts: &[String]) -> SouqResult<Vec<Vec<f32>>>;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
