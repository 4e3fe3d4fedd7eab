use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use souq_core::errors::{EmbeddingError, SouqResult};
use souq_core::traits::IEmbeddingProvider;

struct State {
    dimension: usize,
    mapped: HashMap<String, Vec<f32>>,
    calls: usize,
    fail_next: Option<String>,
}

/// Deterministic embedding provider.
///
/// Texts registered with [`FixedEmbedder::map`] return their registered
/// vector; anything else gets a stable pseudo-random vector of the current
/// dimension. Clones share state, so a test can keep a handle after boxing
/// one into a gateway.
#[derive(Clone)]
pub struct FixedEmbedder {
    state: Arc<Mutex<State>>,
}

impl FixedEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                dimension,
                mapped: HashMap::new(),
                calls: 0,
                fail_next: None,
            })),
        }
    }

    /// Register the vector returned for `text`.
    pub fn map(self, text: &str, vector: Vec<f32>) -> Self {
        self.state
            .lock()
            .unwrap()
            .mapped
            .insert(text.to_string(), vector);
        self
    }

    /// Change the length of generated vectors (simulates a model swap).
    pub fn set_dimension(&self, dimension: usize) {
        self.state.lock().unwrap().dimension = dimension;
    }

    /// The next call fails with `reason`.
    pub fn fail_next(&self, reason: &str) {
        self.state.lock().unwrap().fail_next = Some(reason.to_string());
    }

    /// Number of `embed_batch` calls made so far.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }
}

impl IEmbeddingProvider for FixedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> SouqResult<Vec<Vec<f32>>> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if let Some(reason) = state.fail_next.take() {
            return Err(EmbeddingError::InferenceFailed { reason }.into());
        }

        Ok(texts
            .iter()
            .map(|t| {
                state
                    .mapped
                    .get(t)
                    .cloned()
                    .unwrap_or_else(|| pseudo_vector(t, state.dimension))
            })
            .collect())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn pseudo_vector(text: &str, dimension: usize) -> Vec<f32> {
    // FNV-1a over the text, then a small LCG per component.
    let mut seed: u64 = 0xcbf2_9ce4_8422_2325;
    for b in text.bytes() {
        seed ^= b as u64;
        seed = seed.wrapping_mul(0x0100_0000_01b3);
    }
    (0..dimension)
        .map(|_| {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((seed >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
        })
        .collect()
}
