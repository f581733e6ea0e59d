//! Shared application state for the gateway server.

use relay::{ProviderRegistry, ResolvedRoute, SessionOptions};
use std::sync::Arc;

/// Shared state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Provider/model lookup (immutable after startup discovery).
    pub registry: Arc<ProviderRegistry>,
    /// Default provider/model pair.
    pub route: ResolvedRoute,
    /// Session defaults (continuation cap, segment token cap).
    pub options: SessionOptions,
    /// System prompt prepended to every conversation.
    pub system_prompt: Arc<str>,
}
