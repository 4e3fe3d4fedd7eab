//! # souq-retrieval
//!
//! The search core: input merge, retrieval-mode dispatch, hybrid score
//! fusion, cross-encoder reranking and the request orchestrator.
//!
//! ## Architecture
//!
//! ```text
//! SearchEngine
//! ├── input::merge            (text + image description → query)
//! ├── RetrievalStrategy
//! │   ├── KeywordSearch       (BM25 candidates, raw lexical score)
//! │   ├── VectorSearch        (query embedding → nearest neighbours)
//! │   └── HybridSearch        (BM25 pool × 5 → alpha fusion → top k)
//! ├── Reranker                (ICrossEncoder, stable reorder + threshold)
//! └── IPathResolver           (response shaping)
//! ```

pub mod engine;
pub mod input;
pub mod ranking;
pub mod search;

pub use engine::{SearchEngine, SearchStage};
pub use ranking::{HttpCrossEncoder, Reranker};
pub use search::{HybridSearch, KeywordSearch, RetrievalParams, RetrievalStrategy, VectorSearch};
