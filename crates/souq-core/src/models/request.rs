use serde::{Deserialize, Serialize};

use crate::config::{defaults, RetrievalConfig};

/// A single search request as seen by the orchestrator.
///
/// `mode` stays a raw string here: an unknown mode is a request-level
/// rejection, not a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    pub text: Option<String>,
    #[serde(skip)]
    pub image_bytes: Option<Vec<u8>>,
    pub mode: String,
    pub k: usize,
    pub alpha: f64,
    pub reranker: bool,
    /// Minimum rerank score to keep (0 = disabled).
    pub reranker_threshold: f64,
    pub store: Option<String>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            text: None,
            image_bytes: None,
            mode: defaults::DEFAULT_MODE.to_string(),
            k: defaults::DEFAULT_K,
            alpha: defaults::DEFAULT_ALPHA,
            reranker: defaults::DEFAULT_RERANKER_ENABLED,
            reranker_threshold: defaults::DEFAULT_RERANKER_THRESHOLD,
            store: None,
        }
    }
}

impl SearchRequest {
    /// A text request using the configured defaults.
    pub fn text(text: impl Into<String>, config: &RetrievalConfig) -> Self {
        Self {
            text: Some(text.into()),
            mode: config.default_mode.clone(),
            k: config.default_k,
            alpha: config.default_alpha,
            reranker: config.default_reranker,
            reranker_threshold: config.default_reranker_threshold,
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_reranker(mut self, enabled: bool, threshold: f64) -> Self {
        self.reranker = enabled;
        self.reranker_threshold = threshold;
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn with_image(mut self, bytes: Vec<u8>) -> Self {
        self.image_bytes = Some(bytes);
        self
    }
}
