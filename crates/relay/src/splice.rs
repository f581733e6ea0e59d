//! Switchable stream: splices successive segment streams into one
//! ordered, cancelable output channel.
//!
//! A [`SwitchStream`] owns at most one active upstream source at a
//! time. A single pump task is the sole consumer of a control channel
//! carrying attach/close/fail events and of the active source, so no
//! lock is needed: all mutation of the active slot happens on that one
//! task. Chunks are forwarded in arrival order through a bounded
//! channel, which is where downstream backpressure lands.

use crate::{driver::ChunkStream, error::RelayError};
use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use tokio::sync::mpsc;

/// Bounded buffer between the pump and the consumer.
const OUTPUT_BUFFER: usize = 32;

/// Control events consumed by the pump task.
enum Control {
    /// Install a new active source, canceling any previous one.
    Attach(ChunkStream),
    /// Flush forwarded output and end the stream.
    Close,
    /// Terminate the output stream with an error.
    Fail(RelayError),
}

/// One readable output channel backed at any instant by at most one
/// upstream source.
pub struct SwitchStream {
    control: mpsc::UnboundedSender<Control>,
}

impl SwitchStream {
    /// Create a switch stream and its caller-facing output.
    ///
    /// The output ends when [`close`](Self::close) or
    /// [`fail`](Self::fail) is processed, or when the `SwitchStream`
    /// handle is dropped. Dropping the output cancels the active
    /// source and stops the pump.
    pub fn channel() -> (
        Self,
        impl Stream<Item = Result<Bytes, RelayError>> + Send + 'static,
    ) {
        let (control, control_rx) = mpsc::unbounded_channel();
        let (out_tx, mut out_rx) = mpsc::channel(OUTPUT_BUFFER);
        tokio::spawn(pump(control_rx, out_tx));

        let output = async_stream::stream! {
            while let Some(item) = out_rx.recv().await {
                yield item;
            }
        };
        (Self { control }, output)
    }

    /// Install `source` as the active pump target.
    ///
    /// A previous source still open is canceled first (best-effort,
    /// errors swallowed), so the consumer never reads interleavings
    /// from two sources.
    pub fn attach(&self, source: ChunkStream) {
        let _ = self.control.send(Control::Attach(source));
    }

    /// Cancel the active source (if any) and signal end-of-stream.
    /// Idempotent.
    pub fn close(&self) {
        let _ = self.control.send(Control::Close);
    }

    /// Terminate the output with `error`; further input is discarded.
    pub fn fail(&self, error: RelayError) {
        let _ = self.control.send(Control::Fail(error));
    }

    /// Whether the output has terminated or been abandoned by the
    /// consumer.
    pub fn is_closed(&self) -> bool {
        self.control.is_closed()
    }
}

/// Pull the next chunk from the active source, pending forever when no
/// source is installed.
async fn next_chunk(active: &mut Option<ChunkStream>) -> Option<String> {
    match active {
        Some(source) => source.next().await,
        None => std::future::pending().await,
    }
}

async fn pump(
    mut control: mpsc::UnboundedReceiver<Control>,
    out: mpsc::Sender<Result<Bytes, RelayError>>,
) {
    let mut active: Option<ChunkStream> = None;
    loop {
        tokio::select! {
            biased;
            event = control.recv() => match event {
                Some(Control::Attach(source)) => {
                    if active.is_some() {
                        tracing::debug!("superseding active source");
                    }
                    active = Some(source);
                }
                Some(Control::Close) | None => break,
                Some(Control::Fail(error)) => {
                    let _ = out.send(Err(error)).await;
                    break;
                }
            },
            () = out.closed() => {
                tracing::debug!("output abandoned, canceling active source");
                break;
            }
            chunk = next_chunk(&mut active) => match chunk {
                Some(text) => {
                    if out.send(Ok(Bytes::from(text))).await.is_err() {
                        break;
                    }
                }
                // Source exhausted; hold position until the controller
                // attaches the next segment or closes.
                None => active = None,
            },
        }
    }
}
