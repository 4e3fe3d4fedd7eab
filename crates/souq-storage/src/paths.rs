//! Store-relative image path → public URL resolution.
//!
//! Crawled images live under `<data_root>/<dataset>/<store>/...` and are
//! served under a public prefix. The store directory map is built lazily on
//! first use and kept for the process lifetime.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use souq_core::config::PathsConfig;
use souq_core::traits::IPathResolver;
use tracing::{debug, warn};

/// Resolves image paths against the on-disk store layout.
pub struct StorePathResolver {
    data_root: Option<PathBuf>,
    base_url: String,
    stores: OnceLock<HashMap<String, String>>,
}

impl StorePathResolver {
    pub fn new(data_root: Option<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            data_root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            stores: OnceLock::new(),
        }
    }

    pub fn from_config(config: &PathsConfig) -> Self {
        Self::new(
            config.data_root.as_ref().map(PathBuf::from),
            config.base_image_url.clone(),
        )
    }

    /// Lowercased store name → store directory relative to the data root.
    fn stores(&self) -> &HashMap<String, String> {
        self.stores.get_or_init(|| match &self.data_root {
            Some(root) => scan_stores(root),
            None => {
                warn!("no data root configured; image paths will not resolve");
                HashMap::new()
            }
        })
    }
}

impl IPathResolver for StorePathResolver {
    fn resolve(&self, store: Option<&str>, relative_paths: &[String]) -> Vec<String> {
        let Some(store) = store else {
            return Vec::new();
        };
        if relative_paths.is_empty() {
            return Vec::new();
        }

        let Some(store_dir) = self.stores().get(&store.to_lowercase()) else {
            debug!(store, "unknown store, dropping image paths");
            return Vec::new();
        };

        relative_paths
            .iter()
            .map(|p| format!("{}/{}/{}", self.base_url, store_dir, p))
            .collect()
    }
}

fn scan_stores(root: &Path) -> HashMap<String, String> {
    let mut stores = HashMap::new();
    let Ok(datasets) = fs::read_dir(root) else {
        warn!(root = %root.display(), "data root is not readable");
        return stores;
    };

    for dataset in datasets.flatten() {
        let dataset_path = dataset.path();
        if !dataset_path.is_dir() {
            continue;
        }
        let Ok(entries) = fs::read_dir(&dataset_path) else {
            continue;
        };
        for store in entries.flatten() {
            let store_path = store.path();
            if !store_path.is_dir() {
                continue;
            }
            let Ok(relative) = store_path.strip_prefix(root) else {
                continue;
            };
            // URL paths always use forward slashes.
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            stores.insert(store.file_name().to_string_lossy().to_lowercase(), relative);
        }
    }

    debug!(stores = stores.len(), "image store map built");
    stores
}
