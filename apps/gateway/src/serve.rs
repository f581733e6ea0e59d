//! Shared gateway serve entrypoint — used by the binary and tests.

use crate::{config::GatewayConfig, routes, state::AppState};
use anyhow::Result;
use relay::{ProviderRegistry, ResolvedRoute, SessionOptions, normalize::DEFAULT_SYSTEM_PROMPT};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Handle returned by [`serve`] — holds the bound port and shutdown trigger.
pub struct ServeHandle {
    /// The port the gateway is listening on.
    pub port: u16,
    /// Send a value to trigger graceful shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Join handle for the server task.
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl ServeHandle {
    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Build the shared state: registry (with startup discovery), default
/// route, and session defaults.
pub async fn build_state(config: &GatewayConfig) -> AppState {
    let mut registry = ProviderRegistry::with_defaults();
    if config.discovery.enabled {
        registry.discover_local(&config.discovery.base_url).await;
    }

    if !registry.contains(&config.llm.model) {
        tracing::warn!(
            "default model '{}' is not in the registry; directives can still reroute",
            config.llm.model
        );
    }

    AppState {
        registry: Arc::new(registry),
        route: ResolvedRoute {
            provider: config.llm.provider.clone(),
            model: config.llm.model.clone(),
        },
        options: SessionOptions {
            max_continuations: config.llm.max_continuations,
            max_tokens: config.llm.max_tokens,
            tool_choice: None,
        },
        system_prompt: config
            .llm
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
            .into(),
    }
}

/// Build the state, bind the axum server, and start serving.
///
/// Returns a [`ServeHandle`] with the bound port and a shutdown
/// trigger. The server runs in a spawned task — call
/// `handle.shutdown()` to stop it.
pub async fn serve(config: &GatewayConfig) -> Result<ServeHandle> {
    let state = build_state(config).await;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("gateway listening on {} (port {port})", config.server.bind);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}
