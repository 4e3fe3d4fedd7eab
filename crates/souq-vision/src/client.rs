//! OpenAI-compatible `/chat/completions` vision client.

use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use souq_core::config::VisionConfig;
use souq_core::errors::{SouqResult, VisionError};
use souq_core::traits::IImageToText;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::prompt::{SYSTEM_PROMPT, USER_INSTRUCTION};

/// `IImageToText` backed by a hosted vision model (OpenRouter by default).
pub struct VisionClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f64,
    client: reqwest::Client,
    runtime: Runtime,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Value,
}

impl VisionClient {
    pub fn new(config: &VisionConfig) -> SouqResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisionError::RequestFailed {
                reason: format!("HTTP client error: {e}"),
            })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| VisionError::RequestFailed {
                reason: format!("runtime error: {e}"),
            })?;

        if config.api_key.is_none() {
            warn!("vision client has no API key; hosted endpoints will reject requests");
        }
        info!(model = %config.model, "VisionClient initialized");

        Ok(Self {
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            client,
            runtime,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, image_bytes: &[u8]) -> Value {
        let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(image_bytes));
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": USER_INSTRUCTION },
                        { "type": "image_url", "image_url": { "url": data_url } }
                    ]
                }
            ]
        })
    }

    fn send(&self, body: &Value) -> Result<ChatResponse, VisionError> {
        self.runtime.block_on(async {
            let mut request = self.client.post(&self.endpoint).json(body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = request.send().await.map_err(|e| VisionError::RequestFailed {
                reason: format!("HTTP error: {e}"),
            })?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(VisionError::RequestFailed {
                    reason: format!("API returned {status}: {text}"),
                });
            }

            response
                .json::<ChatResponse>()
                .await
                .map_err(|e| VisionError::RequestFailed {
                    reason: format!("JSON parse error: {e}"),
                })
        })
    }
}

impl IImageToText for VisionClient {
    fn process(&self, image_bytes: &[u8]) -> SouqResult<String> {
        if image_bytes.is_empty() {
            warn!("no image bytes provided");
            return Ok(String::new());
        }

        let start = Instant::now();
        debug!(bytes = image_bytes.len(), "describing image");
        let response = self.send(&self.request_body(image_bytes))?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(VisionError::EmptyResponse)?;
        let text = content_text(&choice.message.content);

        info!(
            chars = text.chars().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "image converted to text"
        );
        Ok(text)
    }
}

/// Flatten message content: either a plain string or a list of typed parts
/// whose `text` parts are joined with newlines.
pub fn content_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.trim().to_string(),
        Value::Array(parts) => parts
            .iter()
            .filter(|p| p.get("type").and_then(Value::as_str) == Some("text"))
            .map(|p| p.get("text").and_then(Value::as_str).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VisionClient {
        VisionClient::new(&VisionConfig {
            base_url: "http://127.0.0.1:9/v1/".into(),
            api_key: Some("sk-test".into()),
            timeout_secs: 1,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoint_is_chat_completions() {
        assert_eq!(client().endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn empty_image_skips_network() {
        assert_eq!(client().process(&[]).unwrap(), "");
    }

    #[test]
    fn request_embeds_image_as_data_url() {
        let body = client().request_body(&[1, 2, 3]);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/jpeg;base64,AQID"
        );
    }

    #[test]
    fn string_content_is_trimmed() {
        assert_eq!(content_text(&json!("  {\"a\": 1}\n")), "{\"a\": 1}");
    }

    #[test]
    fn part_list_joins_text_parts() {
        let content = json!([
            {"type": "text", "text": "first"},
            {"type": "image_url", "image_url": {"url": "x"}},
            {"type": "text", "text": "second "}
        ]);
        assert_eq!(content_text(&content), "first\nsecond");
    }

    #[test]
    fn null_content_is_empty() {
        assert_eq!(content_text(&Value::Null), "");
    }

    #[test]
    fn unreachable_endpoint_is_request_failure() {
        let err = client().process(&[0xff, 0xd8]).unwrap_err();
        assert!(matches!(
            err,
            souq_core::SouqError::VisionError(VisionError::RequestFailed { .. })
        ));
    }
}
