use serde::{Deserialize, Serialize};

use super::defaults;

/// Document store (Weaviate) connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub weaviate_url: String,
    /// Collection holding the product documents.
    pub class_name: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            weaviate_url: defaults::DEFAULT_WEAVIATE_URL.to_string(),
            class_name: defaults::DEFAULT_WEAVIATE_CLASS.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_STORAGE_TIMEOUT_SECS,
        }
    }
}
