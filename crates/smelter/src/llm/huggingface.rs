//! Hugging Face chat-completion provider.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, SmelterError};

use super::provider::{ChatMessage, GenConfig, TextGenerator};

/// Chat-completion endpoints, tried in order. A 404/405 moves on to the
/// next endpoint; any other failure is reported to the caller.
const ENDPOINTS: &[&str] = &[
    "https://router.huggingface.co/v1/chat/completions",
    "https://api-inference.huggingface.co/v1/chat/completions",
];

/// Environment variables checked for an API token, in order.
const TOKEN_VARS: &[&str] = &["SMELTER_HF_TOKEN", "HF_TOKEN"];

/// Hugging Face inference provider.
pub struct HfProvider {
    client: Client,
    token: String,
}

impl HfProvider {
    /// Create a provider with the given API token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| SmelterError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.into(),
        })
    }

    /// Create from the first set token environment variable.
    pub fn from_env() -> Result<Self> {
        let token = TOKEN_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                SmelterError::Config(format!(
                    "no generation token set (checked {})",
                    TOKEN_VARS.join(", ")
                ))
            })?;
        Self::new(token)
    }
}

impl TextGenerator for HfProvider {
    fn generate(&self, messages: &[ChatMessage], config: &GenConfig) -> Result<String> {
        let body = json!({
            "model": config.model,
            "messages": messages,
            "temperature": config.temperature,
            "max_tokens": config.max_tokens,
        });

        for url in ENDPOINTS {
            let response = self
                .client
                .post(*url)
                .bearer_auth(&self.token)
                .json(&body)
                .send()
                .map_err(|e| SmelterError::Generation(format!("request to {url} failed: {e}")))?;

            let status = response.status();
            if status.is_success() {
                let parsed: ChatResponse = response
                    .json()
                    .map_err(|e| SmelterError::Generation(format!("bad response body: {e}")))?;
                return parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| SmelterError::Generation("no choices in response".to_string()));
            }

            // Route misses fall through to the next endpoint.
            if status.as_u16() != 404 && status.as_u16() != 405 {
                let text = response.text().unwrap_or_default();
                let snippet: String = text.chars().take(200).collect();
                return Err(SmelterError::Generation(format!("{status}: {snippet}")));
            }
        }

        Err(SmelterError::Generation(
            "no endpoint accepted the request".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shape_parses() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }

    #[test]
    fn test_empty_choices_tolerated() {
        let parsed: ChatResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
