use std::sync::{Arc, Mutex};

use souq_core::traits::IPathResolver;

/// Resolves every known path to `/images/<store>/<path>` and records calls.
#[derive(Clone, Default)]
pub struct RecordingPathResolver {
    calls: Arc<Mutex<Vec<(Option<String>, Vec<String>)>>>,
}

impl RecordingPathResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(Option<String>, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl IPathResolver for RecordingPathResolver {
    fn resolve(&self, store: Option<&str>, relative_paths: &[String]) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .push((store.map(str::to_string), relative_paths.to_vec()));
        let Some(store) = store else {
            return Vec::new();
        };
        relative_paths
            .iter()
            .map(|p| format!("/images/{}/{p}", store.to_lowercase()))
            .collect()
    }
}
