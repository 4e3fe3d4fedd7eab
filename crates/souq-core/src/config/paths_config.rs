use serde::{Deserialize, Serialize};

use super::defaults;

/// Image path resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the crawled data tree (`<root>/<dataset>/<store>/...`).
    pub data_root: Option<String>,
    /// Public URL prefix the image tree is served under.
    pub base_image_url: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_root: None,
            base_image_url: defaults::DEFAULT_BASE_IMAGE_URL.to_string(),
        }
    }
}
