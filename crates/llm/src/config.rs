//! Configuration for a chat

use serde::{Deserialize, Serialize};

/// Chat configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct General {
    /// The model to use
    pub model: String,

    /// Per-request output token cap. `None` leaves the provider default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Whether the model may invoke tools. `None` leaves the provider
    /// default; continuation segments force [`ToolChoice::None`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
}

impl General {
    /// Create a new configuration
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens: None,
            tool_choice: None,
        }
    }
}

impl Default for General {
    fn default() -> Self {
        Self::new("gpt-4o-mini")
    }
}

/// Whether and how the model may invoke tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// Tool invocation disabled.
    None,
    /// The model decides.
    Auto,
}
