//! In-memory query embedding cache using moka.
//!
//! TinyLFU admission, size-bounded, with idle and absolute TTLs.

use std::time::Duration;

use moka::sync::Cache;

/// Query embedding cache.
///
/// Keys are blake3 hashes of the query text. Values are raw vectors.
pub struct QueryCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryCache {
    /// Create a cache holding at most `max_entries` vectors.
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .time_to_live(Duration::from_secs(86400))
            .build();

        Self { cache }
    }

    /// Cache key for a query text.
    pub fn key_for(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
