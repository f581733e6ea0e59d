//! Provider registry: model/provider lookup and credential resolution.
//!
//! A read-only table mapping provider names to endpoints and API-key
//! environment variables, and model identifiers to the provider serving
//! them. Built once at startup and passed by reference into routing;
//! the only mutation is the optional local-discovery phase, which runs
//! before the registry is shared.

use compact_str::CompactString;
use llm::{Client, HttpProvider};
use serde::Deserialize;
use std::time::Duration;

/// OpenAI-compatible endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
    /// DeepSeek chat completions.
    pub const DEEPSEEK: &str = "https://api.deepseek.com/chat/completions";
    /// Grok (xAI) chat completions.
    pub const GROK: &str = "https://api.x.ai/v1/chat/completions";
    /// Qwen (Alibaba DashScope) chat completions.
    pub const QWEN: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
    /// Kimi (Moonshot) chat completions.
    pub const KIMI: &str = "https://api.moonshot.cn/v1/chat/completions";
    /// Ollama local chat completions.
    pub const OLLAMA: &str = "http://localhost:11434/v1/chat/completions";
}

/// Probe timeout for local discovery.
const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Credentials resolved for a provider.
///
/// A missing API key resolves to `None` rather than an error; key
/// checks happen at the provider, not here.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// The API key from the provider's environment variable, if set.
    pub api_key: Option<String>,
    /// The chat completions endpoint URL.
    pub base_url: String,
}

/// A known model and the provider serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// The model identifier, matched case-sensitively against directives.
    pub id: CompactString,
    /// The provider name.
    pub provider: CompactString,
}

/// A provider: endpoint plus API-key source.
#[derive(Debug, Clone)]
struct ProviderEntry {
    name: CompactString,
    endpoint: String,
    key_env: Option<&'static str>,
}

/// Read-only provider/model lookup.
pub struct ProviderRegistry {
    providers: Vec<ProviderEntry>,
    models: Vec<ModelEntry>,
    client: Client,
}

impl ProviderRegistry {
    /// Create a registry with the static provider and model tables.
    pub fn new(client: Client) -> Self {
        let providers = vec![
            provider("openai", endpoint::OPENAI, Some("OPENAI_API_KEY")),
            provider("deepseek", endpoint::DEEPSEEK, Some("DEEPSEEK_API_KEY")),
            provider("grok", endpoint::GROK, Some("XAI_API_KEY")),
            provider("qwen", endpoint::QWEN, Some("DASHSCOPE_API_KEY")),
            provider("kimi", endpoint::KIMI, Some("MOONSHOT_API_KEY")),
            provider("ollama", endpoint::OLLAMA, None),
        ];

        let models = [
            ("gpt-4o", "openai"),
            ("gpt-4o-mini", "openai"),
            ("gpt-4.1", "openai"),
            ("gpt-4.1-mini", "openai"),
            ("deepseek-chat", "deepseek"),
            ("deepseek-reasoner", "deepseek"),
            ("grok-3", "grok"),
            ("grok-3-mini", "grok"),
            ("qwen-plus", "qwen"),
            ("qwen-turbo", "qwen"),
            ("kimi-k2", "kimi"),
            ("moonshot-v1-8k", "kimi"),
        ]
        .into_iter()
        .map(|(id, provider)| ModelEntry {
            id: id.into(),
            provider: provider.into(),
        })
        .collect();

        Self {
            providers,
            models,
            client,
        }
    }

    /// Create a registry with a fresh HTTP client.
    pub fn with_defaults() -> Self {
        Self::new(Client::new())
    }

    /// Resolve credentials for a provider name.
    ///
    /// Unknown providers and unset key variables resolve to empty
    /// values, never an error.
    pub fn resolve(&self, provider: &str) -> Credentials {
        let Some(entry) = self.providers.iter().find(|p| p.name == provider) else {
            return Credentials::default();
        };
        Credentials {
            api_key: entry.key_env.and_then(|var| std::env::var(var).ok()),
            base_url: entry.endpoint.clone(),
        }
    }

    /// Whether a model identifier is known.
    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m.id == model)
    }

    /// The provider serving a known model.
    pub fn provider_of(&self, model: &str) -> Option<&CompactString> {
        self.models
            .iter()
            .find(|m| m.id == model)
            .map(|m| &m.provider)
    }

    /// Build a streamable handle for a provider.
    ///
    /// The model itself travels in the request body, so the handle is
    /// per-provider; recognition of the provider name is the caller's
    /// concern and an unknown name is an error here.
    pub fn handle(&self, provider: &str) -> anyhow::Result<HttpProvider> {
        let credentials = self.resolve(provider);
        if credentials.base_url.is_empty() {
            anyhow::bail!("unknown provider: {provider}");
        }
        match credentials.api_key {
            Some(key) => HttpProvider::bearer(self.client.clone(), &key, credentials.base_url),
            None => Ok(HttpProvider::no_auth(
                self.client.clone(),
                credentials.base_url,
            )),
        }
    }

    /// All known models, discovery-prepended first.
    pub fn models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Prepend models to the known list.
    pub fn prepend_models(&mut self, entries: Vec<ModelEntry>) {
        self.models.splice(0..0, entries);
    }

    /// Probe a locally reachable Ollama server and prepend its models.
    ///
    /// On success the ollama provider endpoint is rebased onto
    /// `base_url` so the discovered models are actually served from the
    /// instance that reported them. Every failure degrades silently to
    /// the static list; discovery never blocks startup.
    pub async fn discover_local(&mut self, base_url: &str) {
        let url = format!("{}/api/tags", base_url.trim_end_matches('/'));
        let response = match self
            .client
            .get(&url)
            .timeout(DISCOVERY_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("local discovery skipped: {e}");
                return;
            }
        };

        let tags: TagsResponse = match response.json().await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::debug!("local discovery response unreadable: {e}");
                return;
            }
        };
        if tags.models.is_empty() {
            return;
        }

        if let Some(entry) = self.providers.iter_mut().find(|p| p.name == "ollama") {
            entry.endpoint = format!(
                "{}/v1/chat/completions",
                base_url.trim_end_matches('/')
            );
        }

        let discovered: Vec<ModelEntry> = tags
            .models
            .into_iter()
            .map(|tag| ModelEntry {
                id: tag.name.into(),
                provider: "ollama".into(),
            })
            .collect();
        tracing::info!("discovered {} local models", discovered.len());
        self.prepend_models(discovered);
    }
}

fn provider(name: &str, endpoint: &str, key_env: Option<&'static str>) -> ProviderEntry {
    ProviderEntry {
        name: name.into(),
        endpoint: endpoint.to_owned(),
        key_env,
    }
}

/// Ollama `/api/tags` response.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<Tag>,
}

/// A single local model tag.
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}
