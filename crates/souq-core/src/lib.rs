//! # souq-core
//!
//! Foundation crate for the souq product search engine.
//! Defines the shared types, collaborator traits, errors and config.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SouqConfig;
pub use errors::{SouqError, SouqResult};
pub use models::{Candidate, RetrievalMode, ScoredCandidate, SearchRequest, SearchResponse};
