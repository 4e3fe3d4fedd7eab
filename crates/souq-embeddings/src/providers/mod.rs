//! Embedding providers.

pub mod api_provider;

pub use api_provider::ApiProvider;

use souq_core::config::EmbeddingConfig;
use souq_core::errors::{ConfigError, SouqResult};
use souq_core::traits::IEmbeddingProvider;
use tracing::info;

/// Build the configured provider.
///
/// The OpenAI-compatible API is the only backend; both the base URL and the
/// model name are required.
pub fn create_provider(config: &EmbeddingConfig) -> SouqResult<Box<dyn IEmbeddingProvider>> {
    let base_url = config
        .base_url
        .clone()
        .ok_or_else(|| ConfigError::MissingField {
            field: "embedding.base_url (EMBED_BASE_URL)".to_string(),
        })?;
    let model = config.model.clone().ok_or_else(|| ConfigError::MissingField {
        field: "embedding.model (EMBED_MODEL)".to_string(),
    })?;

    let provider = ApiProvider::new(
        base_url,
        model,
        config.api_key.clone(),
        config.max_retries,
        config.timeout_secs,
    )?;
    info!(provider = provider.name(), "embedding provider configured");
    Ok(Box::new(provider))
}
