use serde::{Deserialize, Serialize};

use super::defaults;

/// Cross-encoder reranker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankerConfig {
    /// Reranker backend: "http", "fastembed", "none".
    pub backend: String,
    pub model: String,
    /// Base URL of the `/rerank` service for the "http" backend.
    pub endpoint: String,
    /// Score only the first N candidates (0 = score all of them).
    pub candidate_limit: usize,
    pub timeout_secs: u64,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            backend: defaults::DEFAULT_RERANKER_BACKEND.to_string(),
            model: defaults::DEFAULT_RERANKER_MODEL.to_string(),
            endpoint: defaults::DEFAULT_RERANKER_URL.to_string(),
            candidate_limit: defaults::DEFAULT_RERANK_CANDIDATE_LIMIT,
            timeout_secs: defaults::DEFAULT_RERANKER_TIMEOUT_SECS,
        }
    }
}
