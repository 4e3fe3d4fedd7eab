use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use souq_core::errors::{RerankError, SouqResult};
use souq_core::traits::ICrossEncoder;

#[derive(Default)]
struct State {
    batches: Vec<Vec<String>>,
    failure: Option<String>,
}

/// Cross-encoder that scores documents from a fixed table.
///
/// Unlisted documents score `default_score`. Every batch is recorded.
#[derive(Clone)]
pub struct ScriptedCrossEncoder {
    scores: Arc<HashMap<String, f64>>,
    default_score: f64,
    state: Arc<Mutex<State>>,
}

impl ScriptedCrossEncoder {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: Arc::new(scores.iter().map(|(d, s)| (d.to_string(), *s)).collect()),
            default_score: 0.0,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn with_default(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }

    pub fn fail_with(&self, reason: &str) {
        self.state.lock().unwrap().failure = Some(reason.to_string());
    }

    /// Documents of every scored batch, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().batches.clone()
    }
}

impl ICrossEncoder for ScriptedCrossEncoder {
    fn score_pairs(&self, _query: &str, documents: &[&str]) -> SouqResult<Vec<f64>> {
        let mut state = self.state.lock().unwrap();
        state
            .batches
            .push(documents.iter().map(|d| d.to_string()).collect());
        if let Some(reason) = &state.failure {
            return Err(RerankError::ScoringFailed {
                reason: reason.clone(),
            }
            .into());
        }

        Ok(documents
            .iter()
            .map(|d| self.scores.get(*d).copied().unwrap_or(self.default_score))
            .collect())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
