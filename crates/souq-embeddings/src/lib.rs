//! # souq-embeddings
//!
//! Text → vector gateway used by vector and hybrid retrieval.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingGateway
//! ├── IEmbeddingProvider (ApiProvider: OpenAI-compatible /embeddings)
//! ├── Dimension cell (set once on first success, fatal on drift)
//! └── QueryCache (moka, blake3 keys)
//! ```
//!
//! Vectors are returned raw. Callers normalize before computing similarity.

pub mod cache;
pub mod gateway;
pub mod providers;

pub use cache::QueryCache;
pub use gateway::EmbeddingGateway;
pub use providers::ApiProvider;
