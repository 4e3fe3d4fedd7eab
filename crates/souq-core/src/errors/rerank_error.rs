/// Cross-encoder reranking errors.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("model load failed: {model}: {reason}")]
    ModelLoadFailed { model: String, reason: String },

    #[error("scoring failed: {reason}")]
    ScoringFailed { reason: String },

    #[error("score count mismatch: expected {expected}, got {actual}")]
    ScoreCountMismatch { expected: usize, actual: usize },
}
