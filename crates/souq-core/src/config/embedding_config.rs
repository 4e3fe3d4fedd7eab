use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding gateway configuration (OpenAI-compatible endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the embeddings API, e.g. `http://localhost:8000/v1`.
    pub base_url: Option<String>,
    pub api_key: String,
    /// Embedding model name. Required at runtime.
    pub model: Option<String>,
    /// Max entries in the query embedding cache.
    pub l1_cache_size: u64,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: defaults::DEFAULT_EMBED_API_KEY.to_string(),
            model: None,
            l1_cache_size: defaults::DEFAULT_EMBED_L1_CACHE_SIZE,
            max_retries: defaults::DEFAULT_EMBED_MAX_RETRIES,
            timeout_secs: defaults::DEFAULT_EMBED_TIMEOUT_SECS,
        }
    }
}
