//! Caller-facing HTTP routes.
//!
//! `POST /api/chat` relays one conversation and streams the response
//! body chunk by chunk. Failures before the first byte become a plain
//! server error status; anything later terminates the stream in-band,
//! and output already delivered is never retracted.

use crate::state::AppState;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use compact_str::CompactString;
use futures_util::StreamExt;
use relay::{RelayError, SwitchStream, WireMessage, normalize::normalize, session};
use serde::{Deserialize, Serialize};

/// A chat relay request: the conversation so far plus optional
/// per-call overrides.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Ordered conversation turns.
    pub messages: Vec<WireMessage>,
    /// Optional per-segment output token cap override.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

/// A known model, as reported by `/api/models`.
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: CompactString,
    /// Provider serving it.
    pub provider: CompactString,
}

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/models", get(models))
        .with_state(state)
}

/// List known models, discovery-prepended first.
async fn models(State(state): State<AppState>) -> Json<Vec<ModelInfo>> {
    let models = state
        .registry
        .models()
        .iter()
        .map(|entry| ModelInfo {
            id: entry.id.clone(),
            provider: entry.provider.clone(),
        })
        .collect();
    Json(models)
}

/// Relay one conversation as a streamed response.
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    let (messages, route) = normalize(
        &state.registry,
        &state.route,
        &state.system_prompt,
        &request.messages,
    );
    tracing::info!(provider = %route.provider, model = %route.model, "relaying chat");

    let handle = match state.registry.handle(&route.provider) {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("no handle for provider '{}': {e:#}", route.provider);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut options = state.options.clone();
    if let Some(max_tokens) = request.max_tokens {
        options.max_tokens = Some(max_tokens);
    }

    let (splicer, output) = SwitchStream::channel();
    tokio::spawn(async move {
        let end = session::run(handle, &route.model, messages, options, &splicer).await;
        tracing::debug!(?end, "session finished");
    });

    // Peek the first item so pre-stream failures get a status code.
    let mut output = Box::pin(output);
    match output.next().await {
        None => ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], "").into_response(),
        Some(Err(error)) => {
            tracing::error!("relay failed before any output: {error}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Some(Ok(first)) => {
            let body = Body::from_stream(async_stream::stream! {
                yield Ok::<Bytes, RelayError>(first);
                while let Some(item) = output.next().await {
                    yield item;
                }
            });
            ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
        }
    }
}
