//! Weaviate candidate source over the GraphQL endpoint.
//!
//! The store is a dumb candidate provider: it returns BM25 candidates or
//! nearest neighbours and never fuses scores itself.

pub mod parse;
pub mod query;

use std::time::{Duration, Instant};

use serde_json::Value;
use souq_core::config::StorageConfig;
use souq_core::errors::{ConfigError, SourceError, SouqResult};
use souq_core::models::Candidate;
use souq_core::traits::ICandidateSource;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use query::Operator;

const BACKEND: &str = "weaviate";

/// `ICandidateSource` backed by a Weaviate collection.
pub struct WeaviateSource {
    graphql_url: String,
    class_name: String,
    api_key: Option<String>,
    client: reqwest::Client,
    runtime: Runtime,
}

impl WeaviateSource {
    pub fn new(config: &StorageConfig) -> SouqResult<Self> {
        if !query::is_valid_class_name(&config.class_name) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.class_name".to_string(),
                message: format!("{:?} is not a valid class name", config.class_name),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| request_failed(format!("HTTP client error: {e}")))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| request_failed(format!("runtime error: {e}")))?;

        let graphql_url = format!("{}/v1/graphql", config.weaviate_url.trim_end_matches('/'));
        info!(url = %graphql_url, class = %config.class_name, "Weaviate source configured");

        Ok(Self {
            graphql_url,
            class_name: config.class_name.clone(),
            api_key: config.api_key.clone(),
            client,
            runtime,
        })
    }

    fn execute(&self, graphql: String) -> SouqResult<Value> {
        let body = serde_json::json!({ "query": graphql });

        let result: Result<Value, SourceError> = self.runtime.block_on(async {
            let mut request = self.client.post(&self.graphql_url).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = request
                .send()
                .await
                .map_err(|e| request_failed(format!("HTTP error: {e}")))?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(SourceError::QueryFailed {
                    backend: BACKEND.to_string(),
                    message: format!("HTTP {status}: {text}"),
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| SourceError::MalformedResponse {
                    backend: BACKEND.to_string(),
                    reason: e.to_string(),
                })
        });

        Ok(result?)
    }
}

impl ICandidateSource for WeaviateSource {
    fn get_candidates(
        &self,
        query: &str,
        k: usize,
        store: Option<&str>,
        with_vector: bool,
    ) -> SouqResult<Vec<Candidate>> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let graphql = query::build_get_query(
            &self.class_name,
            Operator::Bm25 { query, with_vector },
            k,
            store,
        );
        let body = self.execute(graphql)?;
        let candidates: Vec<Candidate> = parse::objects(&body, &self.class_name)?
            .iter()
            .map(|obj| parse::bm25_candidate(obj, with_vector))
            .collect();

        debug!(
            k,
            store,
            with_vector,
            hits = candidates.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "bm25 candidates"
        );
        Ok(candidates)
    }

    fn vector_search(
        &self,
        vector: &[f32],
        k: usize,
        store: Option<&str>,
    ) -> SouqResult<Vec<Candidate>> {
        if k == 0 || vector.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let graphql =
            query::build_get_query(&self.class_name, Operator::NearVector { vector }, k, store);
        let body = self.execute(graphql)?;
        let candidates: Vec<Candidate> = parse::objects(&body, &self.class_name)?
            .iter()
            .map(parse::vector_candidate)
            .collect();

        debug!(
            k,
            store,
            hits = candidates.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "near-vector candidates"
        );
        Ok(candidates)
    }

    fn name(&self) -> &str {
        BACKEND
    }
}

fn request_failed(reason: String) -> SourceError {
    SourceError::RequestFailed {
        backend: BACKEND.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unsafe_class_name() {
        let config = StorageConfig {
            class_name: "Product) { __schema".into(),
            ..Default::default()
        };
        assert!(WeaviateSource::new(&config).is_err());
    }

    #[test]
    fn zero_k_short_circuits() {
        let source = WeaviateSource::new(&StorageConfig {
            weaviate_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(source.get_candidates("phone", 0, None, false).unwrap().is_empty());
        assert!(source.vector_search(&[1.0], 0, None).unwrap().is_empty());
    }

    #[test]
    fn unreachable_store_is_request_failure() {
        let source = WeaviateSource::new(&StorageConfig {
            weaviate_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
            ..Default::default()
        })
        .unwrap();
        let err = source.get_candidates("phone", 5, None, false).unwrap_err();
        assert!(matches!(
            err,
            souq_core::SouqError::SourceError(SourceError::RequestFailed { .. })
        ));
    }
}
