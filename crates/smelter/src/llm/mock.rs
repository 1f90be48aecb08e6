//! Mock generator for testing.

use crate::error::{Result, SmelterError};

use super::provider::{ChatMessage, GenConfig, TextGenerator};

/// Mock generator returning a fixed reply, or failing on every call.
pub struct MockProvider {
    reply: Option<String>,
}

impl MockProvider {
    /// A mock that answers every call with a canned line.
    pub fn new() -> Self {
        Self {
            reply: Some("Mock generated content.".to_string()),
        }
    }

    /// A mock that answers every call with the given text.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// A mock whose every call fails, for exercising fallback paths.
    pub fn failing() -> Self {
        Self { reply: None }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGenerator for MockProvider {
    fn generate(&self, _messages: &[ChatMessage], _config: &GenConfig) -> Result<String> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(SmelterError::Generation("mock failure".to_string())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
