//! OpenAI-compatible embedding API provider.
//!
//! Works against any `/embeddings` endpoint speaking the OpenAI schema
//! (vLLM, TEI, LiteLLM gateways, hosted APIs). Retries with exponential
//! backoff; the search core itself never retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use souq_core::errors::{EmbeddingError, SouqResult};
use souq_core::traits::IEmbeddingProvider;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// First retry delay; doubles per attempt up to `MAX_BACKOFF_MS`.
const BASE_BACKOFF_MS: u64 = 100;
const MAX_BACKOFF_MS: u64 = 10_000;

/// HTTP embedding provider.
pub struct ApiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    max_retries: u32,
    client: reqwest::Client,
    runtime: Runtime,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: Option<usize>,
    embedding: Vec<f32>,
}

impl ApiProvider {
    /// Create a provider for `{base_url}/embeddings`.
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        max_retries: u32,
        timeout_secs: u64,
    ) -> SouqResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP client error: {e}"),
            })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("runtime error: {e}"),
            })?;

        Ok(Self {
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model,
            api_key,
            max_retries,
            client,
            runtime,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send an embedding request with retry and exponential backoff.
    fn request_embeddings(&self, texts: &[String]) -> SouqResult<Vec<Vec<f32>>> {
        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff(attempt));
                debug!(attempt, "retrying embedding request");
            }

            match self.send_request(texts) {
                Ok(embeddings) => return Ok(embeddings),
                Err(e) => {
                    warn!(attempt, error = %e, "embedding request failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| EmbeddingError::InferenceFailed {
                reason: "all retries exhausted".to_string(),
            })
            .into())
    }

    fn send_request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let body = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("HTTP error: {e}"),
                })?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("API returned {status}: {body}"),
                });
            }

            let resp: EmbedResponse =
                response
                    .json()
                    .await
                    .map_err(|e| EmbeddingError::InferenceFailed {
                        reason: format!("JSON parse error: {e}"),
                    })?;

            Ok(into_ordered(resp.data))
        })
    }
}

/// Restore input order. The OpenAI schema tags each item with its input
/// index; servers that omit it are assumed to answer in order.
fn into_ordered(mut data: Vec<EmbedData>) -> Vec<Vec<f32>> {
    if data.iter().all(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
    }
    data.into_iter().map(|d| d.embedding).collect()
}

impl IEmbeddingProvider for ApiProvider {
    fn embed_batch(&self, texts: &[String]) -> SouqResult<Vec<Vec<f32>>> {
        self.request_embeddings(texts)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Delay before retry `attempt` (1-based).
fn backoff(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(factor).min(MAX_BACKOFF_MS))
}
