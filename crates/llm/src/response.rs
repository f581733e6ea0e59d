//! Completion metadata shared between streaming chunks and final usage
//! accounting.

use crate::Role;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Completion metadata attached to every chunk.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CompletionMeta {
    /// The completion id.
    #[serde(default)]
    pub id: CompactString,

    /// The object type, e.g. `chat.completion.chunk`.
    #[serde(default)]
    pub object: CompactString,

    /// Creation timestamp (unix seconds).
    #[serde(default)]
    pub created: u64,

    /// The model that produced this completion.
    #[serde(default)]
    pub model: CompactString,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Choice {
    /// The choice index.
    #[serde(default)]
    pub index: u32,

    /// The incremental content for this choice.
    #[serde(default)]
    pub delta: Delta,

    /// The reason the model stopped generating, present on the final
    /// chunk of a choice.
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

/// Incremental message content within a streaming choice.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Delta {
    /// The role, sent on the first chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// The content fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model ended naturally.
    Stop,
    /// The per-request output token cap was hit.
    Length,
    /// The model requested tool invocations.
    ToolCalls,
    /// The provider filtered the content.
    ContentFilter,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens produced by the completion.
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens.
    #[serde(default)]
    pub total_tokens: u32,
}
