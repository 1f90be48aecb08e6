//! Text generation capability trait and types.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default chat model requested from the generation service.
pub const DEFAULT_MODEL: &str = "meta-llama/Meta-Llama-3-8B-Instruct";

/// Default response budget for report-sized generations.
pub const DEFAULT_MAX_TOKENS: usize = 900;

/// One role/content message in a chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`system` or `user`).
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request parameters for one generation call.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Model identifier.
    pub model: String,
    /// Maximum tokens in the response.
    pub max_tokens: usize,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.2,
        }
    }
}

impl GenConfig {
    /// Same model and temperature with a different response budget.
    pub fn with_max_tokens(&self, max_tokens: usize) -> Self {
        Self {
            model: self.model.clone(),
            max_tokens,
            temperature: self.temperature,
        }
    }
}

/// Capability interface for the hosted text generation service.
///
/// The pipeline's deterministic builders are the default implementation of
/// the same artifacts; any generator error makes the caller fall back to
/// them, so implementations return structured failures rather than
/// panicking.
pub trait TextGenerator: Send + Sync {
    /// Generate free text for an ordered list of chat messages.
    fn generate(&self, messages: &[ChatMessage], config: &GenConfig) -> Result<String>;

    /// Name of this provider (for logging).
    fn name(&self) -> &str;
}
