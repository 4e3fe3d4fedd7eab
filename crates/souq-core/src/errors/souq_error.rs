use super::{
    ConfigError, EmbeddingError, RerankError, RetrievalError, SourceError, VisionError,
};

/// Result alias used across every souq crate.
pub type SouqResult<T> = Result<T, SouqError>;

/// Top-level error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SouqError {
    #[error("embedding error: {0}")]
    EmbeddingError(#[from] EmbeddingError),

    #[error("retrieval error: {0}")]
    RetrievalError(#[from] RetrievalError),

    #[error("candidate source error: {0}")]
    SourceError(#[from] SourceError),

    #[error("rerank error: {0}")]
    RerankError(#[from] RerankError),

    #[error("vision error: {0}")]
    VisionError(#[from] VisionError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("runtime not initialized")]
    NotInitialized,

    #[error("runtime already initialized")]
    AlreadyInitialized,
}

impl SouqError {
    /// Fatal errors must halt the process instead of being reported as a
    /// per-request failure. Today that is only embedding dimension drift,
    /// which means the embedding backend switched models underneath us.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SouqError::EmbeddingError(EmbeddingError::DimensionMismatch { .. })
        )
    }
}
