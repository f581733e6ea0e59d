//! Generation driver: one provider call per segment.
//!
//! [`generate`] starts a single provider call and hands back the live
//! chunk stream for immediate forwarding plus a deferred completion
//! signal. The stream carries only content; the terminal classification
//! and the accumulated text travel through the oneshot once the call
//! ends. A transport error never surfaces through the live stream:
//! output already forwarded stands, and the outcome carries the cause.

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{FinishReason, General, LLM, Message};
use std::pin::Pin;
use tokio::sync::oneshot;

/// A boxed stream of output text chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Terminal classification of a single provider call.
#[derive(Debug)]
pub enum SegmentFinish {
    /// The model ended naturally, or with any terminal reason other
    /// than a length cap (tool calls and content filtering never
    /// trigger a continuation).
    Stop,
    /// The per-segment output cap was hit.
    Length,
    /// Transport or provider-side failure.
    Error(anyhow::Error),
}

/// Final accounting for one segment.
#[derive(Debug)]
pub struct SegmentOutcome {
    /// The accumulated output text.
    pub text: String,
    /// Why the segment ended.
    pub finish: SegmentFinish,
}

/// A live segment: the forwardable chunk stream plus the deferred
/// completion signal.
///
/// The outcome resolves only after the stream has been consumed to its
/// end; if the stream is dropped early (canceled or superseded), the
/// sender drops with it and the receiver reports closure instead.
pub struct SegmentHandle {
    /// Live chunk stream for immediate forwarding.
    pub stream: ChunkStream,
    /// Deferred completion signal.
    pub outcome: oneshot::Receiver<SegmentOutcome>,
}

/// Start one provider call.
pub fn generate<P>(handle: P, config: General, messages: Vec<Message>) -> SegmentHandle
where
    P: LLM + Send + Sync + 'static,
{
    let (tx, rx) = oneshot::channel();
    let stream = Box::pin(stream! {
        tracing::debug!(
            model = %config.model,
            messages = messages.len(),
            "starting segment"
        );

        let mut text = String::new();
        let mut finish = None;
        {
            let request = P::ChatConfig::from(config);
            let mut upstream = std::pin::pin!(handle.stream(request, &messages));
            while let Some(item) = upstream.next().await {
                match item {
                    Ok(chunk) => {
                        if let Some(reason) = chunk.reason() {
                            finish = Some(match reason {
                                FinishReason::Length => SegmentFinish::Length,
                                _ => SegmentFinish::Stop,
                            });
                        }
                        if let Some(content) = chunk.content() {
                            text.push_str(content);
                            yield content.to_owned();
                        }
                    }
                    Err(e) => {
                        tracing::debug!("segment stream error: {e:#}");
                        finish = Some(SegmentFinish::Error(e));
                        break;
                    }
                }
            }
        }

        let finish = finish.unwrap_or(SegmentFinish::Stop);
        tracing::debug!(chars = text.len(), "segment finished: {finish:?}");
        let _ = tx.send(SegmentOutcome { text, finish });
    });

    SegmentHandle {
        stream,
        outcome: rx,
    }
}
