//! Streaming response abstractions for the unified LLM interfaces

use crate::{
    FinishReason,
    response::{Choice, CompletionMeta, Delta},
};
use serde::Deserialize;

/// A streaming chat completion chunk
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    /// Completion metadata
    #[serde(flatten)]
    pub meta: CompletionMeta,

    /// The list of completion choices (with delta content)
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage statistics (only in final chunk)
    pub usage: Option<crate::Usage>,
}

impl StreamChunk {
    /// Create a chunk carrying a content fragment.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                delta: Delta {
                    content: Some(content.into()),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Create a terminal chunk carrying a finish reason.
    pub fn finish(reason: FinishReason) -> Self {
        Self {
            choices: vec![Choice {
                finish_reason: Some(reason),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    /// Get the content of the first choice
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Get the reason the model stopped generating
    pub fn reason(&self) -> Option<FinishReason> {
        self.choices.first().and_then(|choice| choice.finish_reason)
    }
}
