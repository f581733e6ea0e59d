//! Continuation controller: the state machine coordinating segments.
//!
//! One session covers one caller-visible response. Segment 0 streams
//! until the provider reports a terminal reason; only a length cap
//! triggers a continuation, in which the truncated text and a fixed
//! continuation instruction are appended to a local copy of the
//! conversation and the same provider/model pair is invoked again. The
//! synthetic turns never reach the caller; all the caller sees is the
//! spliced output stream.

use crate::{
    driver::{self, SegmentFinish},
    error::RelayError,
    splice::SwitchStream,
};
use llm::{General, LLM, Message, ToolChoice};

/// Instruction sent as a synthetic user turn after truncated output.
///
/// Providers are sensitive to prompt wording here; tests assert on the
/// constant so the exact text stays part of the contract.
pub const CONTINUE_PROMPT: &str =
    "Continue exactly where you left off without repeating any text that was already generated.";

/// Default cap on continuation segments after the initial one.
///
/// A cost and denial-of-service safeguard, deliberately low.
pub const DEFAULT_MAX_CONTINUATIONS: usize = 2;

/// Settings for one continuation session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Maximum continuation segments after segment 0.
    pub max_continuations: usize,
    /// Per-segment output token cap forwarded to the provider.
    pub max_tokens: Option<u32>,
    /// Tool choice for segment 0; continuation segments always disable
    /// tools.
    pub tool_choice: Option<ToolChoice>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_continuations: DEFAULT_MAX_CONTINUATIONS,
            max_tokens: None,
            tool_choice: None,
        }
    }
}

/// How a session reached its terminal state.
///
/// Failures carry no payload here: the terminal [`RelayError`] travels
/// in-band on the output stream, which is the caller's only window into
/// the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// A segment completed naturally.
    Done {
        /// Segments issued, including the initial one.
        segments: usize,
    },
    /// The caller abandoned the output stream.
    Cancelled {
        /// Segments issued before cancellation.
        segments: usize,
    },
    /// The session failed; the error was delivered on the output.
    Failed {
        /// Segments issued before the failure.
        segments: usize,
    },
}

/// Drive one continuation session to a terminal state.
///
/// Single-use: `messages` is extended locally with synthetic turns on
/// each continuation and the (provider, model) pair behind `handle`
/// stays fixed for every segment.
pub async fn run<P>(
    handle: P,
    model: &str,
    mut messages: Vec<Message>,
    options: SessionOptions,
    splicer: &SwitchStream,
) -> SessionEnd
where
    P: LLM + Send + Sync + 'static,
{
    let mut switches = 0;
    loop {
        let config = General {
            model: model.to_owned(),
            max_tokens: options.max_tokens,
            tool_choice: if switches == 0 {
                options.tool_choice
            } else {
                Some(ToolChoice::None)
            },
        };

        let segment = driver::generate(handle.clone(), config, messages.clone());
        splicer.attach(segment.stream);
        tracing::debug!(segment = switches, model, "segment streaming");

        let Ok(outcome) = segment.outcome.await else {
            // The splicer dropped the source before completion: the
            // consumer is gone.
            tracing::debug!(segment = switches, "segment canceled");
            return SessionEnd::Cancelled {
                segments: switches + 1,
            };
        };

        match outcome.finish {
            SegmentFinish::Stop => {
                splicer.close();
                return SessionEnd::Done {
                    segments: switches + 1,
                };
            }
            SegmentFinish::Error(cause) => {
                tracing::error!(segment = switches, "provider call failed: {cause:#}");
                splicer.fail(RelayError::Provider(cause));
                return SessionEnd::Failed {
                    segments: switches + 1,
                };
            }
            SegmentFinish::Length => {
                if switches >= options.max_continuations {
                    let segments = switches + 1;
                    tracing::warn!(segments, "continuation cap reached");
                    splicer.fail(RelayError::ContinuationCap { segments });
                    return SessionEnd::Failed { segments };
                }
                if splicer.is_closed() {
                    return SessionEnd::Cancelled {
                        segments: switches + 1,
                    };
                }

                tracing::info!(segment = switches, "output truncated, continuing");
                messages.push(Message::assistant(outcome.text));
                messages.push(Message::user(CONTINUE_PROMPT));
                switches += 1;
            }
        }
    }
}
