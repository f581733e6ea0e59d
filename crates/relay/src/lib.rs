//! Weft streaming continuation core.
//!
//! Relays a conversation to an LLM provider and splices the provider's
//! streamed output, across any number of length-capped continuation
//! segments, into one ordered, cancelable stream for the caller.
//!
//! The pipeline: [`directive`] resolves an in-band model override,
//! [`normalize`] assembles the outbound message list and the effective
//! provider/model pair, [`driver`] issues one provider call per segment,
//! [`session`] decides after each segment whether to stop, fail, or
//! continue, and [`splice`] multiplexes the successive segment streams
//! into the single output channel the caller reads.

pub use directive::Parsed;
pub use error::RelayError;
pub use normalize::{DEFAULT_SYSTEM_PROMPT, ResolvedRoute, WireMessage};
pub use registry::{Credentials, ModelEntry, ProviderRegistry};
pub use session::{CONTINUE_PROMPT, SessionEnd, SessionOptions};
pub use splice::SwitchStream;

pub mod directive;
pub mod driver;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod session;
pub mod splice;
