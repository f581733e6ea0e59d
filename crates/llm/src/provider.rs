//! Provider abstractions for the unified LLM interfaces

use crate::{General, Message, StreamChunk};
use anyhow::Result;
use futures_core::Stream;

/// A trait for LLM providers
pub trait LLM: Sized + Clone {
    /// The provider's native request configuration.
    type ChatConfig: From<General> + Send;

    /// Send a message to the LLM with streaming
    fn stream(
        &self,
        config: Self::ChatConfig,
        messages: &[Message],
    ) -> impl Stream<Item = Result<StreamChunk>> + Send;
}
