mod config_error;
mod embedding_error;
mod rerank_error;
mod retrieval_error;
mod souq_error;
mod source_error;
mod vision_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use rerank_error::RerankError;
pub use retrieval_error::RetrievalError;
pub use souq_error::{SouqError, SouqResult};
pub use source_error::SourceError;
pub use vision_error::VisionError;
