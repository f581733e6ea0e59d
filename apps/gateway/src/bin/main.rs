//! Weft gateway binary entry point.
//!
//! Loads TOML configuration, runs local model discovery, and serves
//! the relay with graceful shutdown on ctrl-c.

use anyhow::Result;
use std::path::Path;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use weft_gateway::{GatewayConfig, serve};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration; a missing file falls back to defaults.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gateway.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        let config = GatewayConfig::load(Path::new(&config_path))?;
        tracing::info!("loaded configuration from {config_path}");
        config
    } else {
        tracing::info!("no configuration at {config_path}, using defaults");
        GatewayConfig::default()
    };

    let handle = serve(&config).await?;

    signal::ctrl_c().await?;
    tracing::info!("received ctrl-c");
    handle.shutdown().await?;

    tracing::info!("gateway shut down");
    Ok(())
}
