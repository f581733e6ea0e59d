//! Weft relay gateway.
//!
//! The caller-facing HTTP boundary: accepts a conversation, resolves
//! the target provider/model, and streams back one continuous relayed
//! response. All continuation handling lives in `weft-relay`; this
//! crate is configuration, wiring, and the axum surface.

pub use config::GatewayConfig;
pub use serve::{ServeHandle, build_state, serve};
pub use state::AppState;

pub mod config;
pub mod routes;
pub mod serve;
pub mod state;
pub mod utils;
