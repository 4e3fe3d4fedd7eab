//! In-process cross-encoder via fastembed's `TextRerank`.

use std::sync::Mutex;

use ::fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use souq_core::errors::{RerankError, SouqResult};
use souq_core::traits::ICrossEncoder;
use tracing::info;

/// `ICrossEncoder` running an ONNX reranker locally. The session is loaded
/// once; scoring takes the lock for the duration of one batch.
pub struct FastembedCrossEncoder {
    model_name: String,
    model: Mutex<TextRerank>,
}

impl FastembedCrossEncoder {
    pub fn new(model_name: &str) -> SouqResult<Self> {
        let kind = match model_name {
            "BAAI/bge-reranker-v2-m3" => RerankerModel::BGERerankerV2M3,
            "BAAI/bge-reranker-base" => RerankerModel::BGERerankerBase,
            other => {
                return Err(RerankError::ModelLoadFailed {
                    model: other.to_string(),
                    reason: "not a supported fastembed reranker".to_string(),
                }
                .into())
            }
        };

        let model = TextRerank::try_new(RerankInitOptions::new(kind)).map_err(|e| {
            RerankError::ModelLoadFailed {
                model: model_name.to_string(),
                reason: e.to_string(),
            }
        })?;
        info!(model = model_name, "fastembed reranker loaded");

        Ok(Self {
            model_name: model_name.to_string(),
            model: Mutex::new(model),
        })
    }
}

impl ICrossEncoder for FastembedCrossEncoder {
    fn score_pairs(&self, query: &str, documents: &[&str]) -> SouqResult<Vec<f64>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let mut model = self.model.lock().map_err(|_| RerankError::ScoringFailed {
            reason: "reranker session lock poisoned".to_string(),
        })?;
        let results = model
            .rerank(query, documents, false, None)
            .map_err(|e| RerankError::ScoringFailed {
                reason: e.to_string(),
            })?;

        // Results come back sorted by score; index maps to input position.
        let mut scores = vec![f64::NEG_INFINITY; documents.len()];
        let mut seen = 0usize;
        for r in results {
            if let Some(slot) = scores.get_mut(r.index) {
                *slot = r.score as f64;
                seen += 1;
            }
        }
        if seen != documents.len() {
            return Err(RerankError::ScoreCountMismatch {
                expected: documents.len(),
                actual: seen,
            }
            .into());
        }
        Ok(scores)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}
