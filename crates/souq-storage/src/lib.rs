//! # souq-storage
//!
//! Adapters for the document store and the image tree.
//!
//! - [`WeaviateSource`]: `ICandidateSource` over Weaviate's GraphQL API
//!   (BM25 candidates, near-vector search, pushed-down store filter).
//! - [`StorePathResolver`]: `IPathResolver` mapping store-relative image
//!   paths to public URLs.

pub mod paths;
pub mod weaviate;

pub use paths::StorePathResolver;
pub use weaviate::WeaviateSource;
