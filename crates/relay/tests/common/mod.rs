//! Scripted LLM provider and stream helpers for relay tests.

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{FinishReason, General, LLM, Message, StreamChunk};
use relay::RelayError;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

/// How a scripted reply ends.
#[derive(Debug, Clone, Copy)]
pub enum Finish {
    /// Natural stop.
    Stop,
    /// Length-truncated.
    Length,
    /// Tool-call stop reason (terminal for the relay).
    ToolCalls,
    /// Transport failure after the chunks.
    Error,
    /// Never finishes; for cancellation tests.
    Hang,
}

/// One scripted provider reply.
#[derive(Debug, Clone)]
pub struct Reply {
    pub chunks: Vec<&'static str>,
    pub finish: Finish,
}

/// Shorthand reply constructor.
pub fn reply(chunks: &[&'static str], finish: Finish) -> Reply {
    Reply {
        chunks: chunks.to_vec(),
        finish,
    }
}

/// An LLM provider that plays back scripted replies and records every
/// call it receives.
#[derive(Clone)]
pub struct ScriptedProvider {
    replies: Arc<Vec<Reply>>,
    calls: Arc<AtomicUsize>,
    sent: Arc<Mutex<Vec<(General, Vec<Message>)>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Arc::new(replies),
            calls: Arc::new(AtomicUsize::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The config and messages sent on the `index`th call.
    pub fn sent(&self, index: usize) -> (General, Vec<Message>) {
        self.sent.lock().unwrap()[index].clone()
    }
}

impl LLM for ScriptedProvider {
    type ChatConfig = General;

    fn stream(
        &self,
        config: General,
        messages: &[Message],
    ) -> impl Stream<Item = anyhow::Result<StreamChunk>> + Send {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push((config, messages.to_vec()));
        let reply = self.replies.get(index).cloned();

        async_stream::stream! {
            let Some(reply) = reply else {
                yield Err(anyhow::anyhow!("unscripted call #{index}"));
                return;
            };
            for chunk in &reply.chunks {
                yield Ok(StreamChunk::text(*chunk));
            }
            match reply.finish {
                Finish::Stop => yield Ok(StreamChunk::finish(FinishReason::Stop)),
                Finish::Length => yield Ok(StreamChunk::finish(FinishReason::Length)),
                Finish::ToolCalls => yield Ok(StreamChunk::finish(FinishReason::ToolCalls)),
                Finish::Error => yield Err(anyhow::anyhow!("scripted transport failure")),
                Finish::Hang => std::future::pending::<()>().await,
            }
        }
    }
}

/// Drain a spliced output stream into its text and terminal error.
pub async fn collect(
    output: impl Stream<Item = Result<Bytes, RelayError>>,
) -> (String, Option<RelayError>) {
    let mut output = std::pin::pin!(output);
    let mut text = String::new();
    let mut error = None;
    while let Some(item) = output.next().await {
        match item {
            Ok(bytes) => text.push_str(std::str::from_utf8(&bytes).unwrap()),
            Err(e) => error = Some(e),
        }
    }
    (text, error)
}
