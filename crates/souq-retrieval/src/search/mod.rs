//! Retrieval strategies: keyword, vector and hybrid.

pub mod fusion;
pub mod hybrid;
pub mod keyword;
pub mod similarity;
pub mod vector;

use souq_core::errors::SouqResult;
use souq_core::models::{RetrievalMode, ScoredCandidate};

pub use hybrid::HybridSearch;
pub use keyword::KeywordSearch;
pub use vector::VectorSearch;

/// Per-request retrieval parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalParams<'a> {
    /// Number of results to return.
    pub k: usize,
    /// Vector weight for hybrid fusion, in [0, 1]. Ignored by other modes.
    pub alpha: f64,
    /// Case-insensitive store scope.
    pub store: Option<&'a str>,
}

/// One retrieval mode. Produces candidates scored by that mode alone,
/// sorted best first, at most `k` long.
pub trait RetrievalStrategy: Send + Sync {
    fn mode(&self) -> RetrievalMode;

    fn retrieve(&self, query: &str, params: &RetrievalParams<'_>)
        -> SouqResult<Vec<ScoredCandidate>>;
}
