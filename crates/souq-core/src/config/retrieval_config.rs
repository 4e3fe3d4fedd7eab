use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval defaults and fusion constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Mode used when a request does not name one.
    pub default_mode: String,
    /// Result count used when a request does not set `k`.
    pub default_k: usize,
    /// Hybrid fusion weight used when a request does not set `alpha`.
    pub default_alpha: f64,
    /// Whether requests rerank unless they opt out.
    pub default_reranker: bool,
    /// Rerank threshold used when a request does not set one (0 = disabled).
    pub default_reranker_threshold: f64,
    /// Lexical pool over-fetch factor for hybrid fusion.
    pub hybrid_pool_multiplier: usize,
    /// Raw lexical scores are capped here before normalization.
    pub lexical_score_cap: f64,
    /// Fused pool factor when a store filter is applied after fusion.
    pub store_filter_pool_multiplier: usize,
    /// Lower bound for the store-filtered fused pool.
    pub store_filter_min_pool: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_mode: defaults::DEFAULT_MODE.to_string(),
            default_k: defaults::DEFAULT_K,
            default_alpha: defaults::DEFAULT_ALPHA,
            default_reranker: defaults::DEFAULT_RERANKER_ENABLED,
            default_reranker_threshold: defaults::DEFAULT_RERANKER_THRESHOLD,
            hybrid_pool_multiplier: defaults::DEFAULT_HYBRID_POOL_MULTIPLIER,
            lexical_score_cap: defaults::DEFAULT_LEXICAL_SCORE_CAP,
            store_filter_pool_multiplier: defaults::DEFAULT_STORE_FILTER_POOL_MULTIPLIER,
            store_filter_min_pool: defaults::DEFAULT_STORE_FILTER_MIN_POOL,
        }
    }
}
