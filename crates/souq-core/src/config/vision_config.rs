use serde::{Deserialize, Serialize};

use super::defaults;

/// Image-to-text (vision LLM) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: defaults::DEFAULT_LLM_BASE_URL.to_string(),
            api_key: None,
            model: defaults::DEFAULT_IMAGE_TO_TEXT_MODEL.to_string(),
            temperature: defaults::DEFAULT_VISION_TEMPERATURE,
            timeout_secs: defaults::DEFAULT_VISION_TIMEOUT_SECS,
        }
    }
}
