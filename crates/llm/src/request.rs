//! Shared OpenAI-compatible chat completions request body.

use crate::{General, Message, ToolChoice};
use serde::Serialize;

/// An OpenAI-compatible streaming chat completions request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,

    /// The conversation messages.
    pub messages: Vec<Message>,

    /// Always `true`: the relay only ever streams.
    pub stream: bool,

    /// Per-request output token cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Tool choice, serialized in the provider's wire form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<serde_json::Value>,
}

impl From<General> for Request {
    fn from(config: General) -> Self {
        let tool_choice = config.tool_choice.map(|choice| match choice {
            ToolChoice::None => serde_json::json!("none"),
            ToolChoice::Auto => serde_json::json!("auto"),
        });

        Self {
            model: config.model,
            messages: Vec::new(),
            stream: true,
            max_tokens: config.max_tokens,
            tool_choice,
        }
    }
}

impl Request {
    /// Attach the conversation messages.
    pub fn messages(mut self, messages: &[Message]) -> Self {
        self.messages = messages.to_vec();
        self
    }
}
