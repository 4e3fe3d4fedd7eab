//! Remote cross-encoder over a text-embeddings-inference style `/rerank`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use souq_core::config::RerankerConfig;
use souq_core::errors::{RerankError, SouqResult};
use souq_core::traits::ICrossEncoder;
use tokio::runtime::Runtime;
use tracing::info;

/// `ICrossEncoder` served by a reranking endpoint. Scores are raw logits.
pub struct HttpCrossEncoder {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    runtime: Runtime,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    texts: &'a [&'a str],
    raw_scores: bool,
    truncate: bool,
}

#[derive(Deserialize)]
struct RerankItem {
    index: usize,
    score: f64,
}

impl HttpCrossEncoder {
    pub fn new(config: &RerankerConfig) -> SouqResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| load_failed(&config.model, format!("HTTP client error: {e}")))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| load_failed(&config.model, format!("runtime error: {e}")))?;

        let endpoint = format!("{}/rerank", config.endpoint.trim_end_matches('/'));
        info!(endpoint = %endpoint, model = %config.model, "HttpCrossEncoder configured");

        Ok(Self {
            endpoint,
            model: config.model.clone(),
            client,
            runtime,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ICrossEncoder for HttpCrossEncoder {
    fn score_pairs(&self, query: &str, documents: &[&str]) -> SouqResult<Vec<f64>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let body = RerankRequest {
            query,
            texts: documents,
            raw_scores: true,
            truncate: true,
        };

        let items: Vec<RerankItem> = self.runtime.block_on(async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&body)
                .send()
                .await
                .map_err(|e| scoring_failed(format!("HTTP error: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(scoring_failed(format!("reranker returned {status}: {text}")));
            }

            response
                .json::<Vec<RerankItem>>()
                .await
                .map_err(|e| scoring_failed(format!("JSON parse error: {e}")))
        })?;

        Ok(scores_in_order(items, documents.len())?)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// The endpoint answers sorted by score; put scores back in input order.
fn scores_in_order(items: Vec<RerankItem>, expected: usize) -> Result<Vec<f64>, RerankError> {
    let mismatch = || RerankError::ScoreCountMismatch {
        expected,
        actual: items.len(),
    };
    if items.len() != expected {
        return Err(mismatch());
    }

    let mut scores = vec![None; expected];
    for item in &items {
        match scores.get_mut(item.index) {
            Some(slot) if slot.is_none() => *slot = Some(item.score),
            _ => return Err(mismatch()),
        }
    }
    scores.into_iter().map(|s| s.ok_or_else(mismatch)).collect()
}

fn load_failed(model: &str, reason: String) -> RerankError {
    RerankError::ModelLoadFailed {
        model: model.to_string(),
        reason,
    }
}

fn scoring_failed(reason: String) -> RerankError {
    RerankError::ScoringFailed { reason }
}
