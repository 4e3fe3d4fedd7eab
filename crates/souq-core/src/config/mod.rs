pub mod defaults;
mod embedding_config;
mod observability_config;
mod paths_config;
mod reranker_config;
mod retrieval_config;
mod storage_config;
mod vision_config;

pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use paths_config::PathsConfig;
pub use reranker_config::RerankerConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;
pub use vision_config::VisionConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Reranker backends the runtime knows how to build.
pub const RERANKER_BACKENDS: &[&str] = &["http", "fastembed", "none"];

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`EMBED_*`, `WEAVIATE_*`, `DATA_ROOT`, ...)
/// 2. TOML file or string
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SouqConfig {
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
    pub reranker: RerankerConfig,
    pub vision: VisionConfig,
    pub paths: PathsConfig,
    pub observability: ObservabilityConfig,
}

impl SouqConfig {
    /// Load configuration: defaults, then the optional TOML file, then the
    /// process environment. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML string. Missing keys fall back to defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup. Unparseable numeric
    /// values are ignored and the previous value is kept.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("EMBED_BASE_URL") {
            self.embedding.base_url = Some(v);
        }
        if let Some(v) = lookup("EMBED_API_KEY") {
            self.embedding.api_key = v;
        }
        if let Some(v) = lookup("EMBED_MODEL") {
            self.embedding.model = Some(v);
        }
        if let Some(v) = lookup("WEAVIATE_URL") {
            self.storage.weaviate_url = v;
        }
        if let Some(v) = lookup("WEAVIATE_CLASS") {
            self.storage.class_name = v;
        }
        if let Some(v) = lookup("WEAVIATE_API_KEY") {
            self.storage.api_key = Some(v);
        }
        if let Some(v) = lookup("DATA_ROOT") {
            self.paths.data_root = Some(v);
        }
        if let Some(v) = lookup("RERANKER_BACKEND") {
            self.reranker.backend = v;
        }
        if let Some(v) = lookup("RERANKER_MODEL") {
            self.reranker.model = v;
        }
        if let Some(v) = lookup("RERANKER_URL") {
            self.reranker.endpoint = v;
        }
        if let Some(v) = lookup("RERANK_CANDIDATE_LIMIT") {
            if let Ok(limit) = v.parse::<usize>() {
                self.reranker.candidate_limit = limit;
            }
        }
        if let Some(v) = lookup("OPENROUTER_API_KEY") {
            self.vision.api_key = Some(v);
        }
        if let Some(v) = lookup("LLM_BASE_URL") {
            self.vision.base_url = v;
        }
        if let Some(v) = lookup("IMAGE_TO_TEXT_MODEL") {
            self.vision.model = v;
        }
        if let Some(v) = lookup("SOUQ_LOG") {
            self.observability.log_level = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.retrieval;
        if !(0.0..=1.0).contains(&r.default_alpha) {
            return Err(invalid("retrieval.default_alpha", "must be between 0.0 and 1.0"));
        }
        if r.default_k == 0 {
            return Err(invalid("retrieval.default_k", "must be greater than 0"));
        }
        if !r.default_reranker_threshold.is_finite() {
            return Err(invalid("retrieval.default_reranker_threshold", "must be finite"));
        }
        if !(r.lexical_score_cap.is_finite() && r.lexical_score_cap > 0.0) {
            return Err(invalid("retrieval.lexical_score_cap", "must be a positive number"));
        }
        if r.hybrid_pool_multiplier == 0 {
            return Err(invalid("retrieval.hybrid_pool_multiplier", "must be at least 1"));
        }
        if r.store_filter_pool_multiplier == 0 {
            return Err(invalid(
                "retrieval.store_filter_pool_multiplier",
                "must be at least 1",
            ));
        }
        if !RERANKER_BACKENDS.contains(&self.reranker.backend.as_str()) {
            return Err(invalid(
                "reranker.backend",
                &format!("must be one of {}", RERANKER_BACKENDS.join(", ")),
            ));
        }
        if !(0.0..=2.0).contains(&self.vision.temperature) {
            return Err(invalid("vision.temperature", "must be between 0.0 and 2.0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
