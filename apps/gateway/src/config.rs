//! Gateway configuration loaded from TOML.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level gateway configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Server bind configuration.
    pub server: ServerConfig,
    /// Relay defaults.
    pub llm: LlmConfig,
    /// Local model discovery.
    pub discovery: DiscoveryConfig,
}

/// Server configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_owned(),
        }
    }
}

/// Relay defaults applied when a conversation carries no directive.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Default provider name.
    pub provider: CompactString,
    /// Default model identifier.
    pub model: CompactString,
    /// Maximum continuation segments after the initial one.
    pub max_continuations: usize,
    /// Optional per-segment output token cap.
    pub max_tokens: Option<u32>,
    /// Optional system prompt override.
    pub system_prompt: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            model: "gpt-4o-mini".into(),
            max_continuations: relay::session::DEFAULT_MAX_CONTINUATIONS,
            max_tokens: None,
            system_prompt: None,
        }
    }
}

/// Local model discovery configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Probe a local inference server at startup.
    pub enabled: bool,
    /// Base URL of the local server.
    pub base_url: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434".to_owned(),
        }
    }
}

impl GatewayConfig {
    /// Parse a TOML string into a `GatewayConfig`, expanding `${VAR}`
    /// environment references first.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
