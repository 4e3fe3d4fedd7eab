use crate::errors::SouqResult;
use crate::models::Candidate;

/// Document store abstraction. Owns lexical and vector indexing; the
/// search core only consumes candidates.
pub trait ICandidateSource: Send + Sync {
    /// Lexical (BM25) retrieval of up to `k` candidates.
    ///
    /// With `with_vector`, candidates carry their stored embedding when the
    /// store has one. A missing vector is not an error.
    fn get_candidates(
        &self,
        query: &str,
        k: usize,
        store: Option<&str>,
        with_vector: bool,
    ) -> SouqResult<Vec<Candidate>>;

    /// Nearest-neighbour retrieval. Candidates carry `similarity`
    /// (`1 - distance`), ordered best first.
    fn vector_search(
        &self,
        vector: &[f32],
        k: usize,
        store: Option<&str>,
    ) -> SouqResult<Vec<Candidate>>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}
