use crate::errors::SouqResult;

/// Pairwise (query, document) relevance model.
pub trait ICrossEncoder: Send + Sync {
    /// Score every document against the query in one batch.
    /// Returns one score per document, in input order. Higher is more relevant.
    fn score_pairs(&self, query: &str, documents: &[&str]) -> SouqResult<Vec<f64>>;

    /// Model name for logs.
    fn name(&self) -> &str;
}
