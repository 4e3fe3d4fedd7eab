mod candidate;
mod mode;
mod request;
mod response;

pub use candidate::{Candidate, ScoredCandidate};
pub use mode::RetrievalMode;
pub use request::SearchRequest;
pub use response::{ProductResult, SearchResponse};
