//! Turn normalization: directive stripping and outbound message assembly.
//!
//! Builds the message list actually sent to the provider (the system
//! prompt first, then every turn in original order with model
//! directives stripped) and resolves the effective provider/model pair
//! for the whole upcoming session.

use crate::{directive, registry::ProviderRegistry};
use compact_str::CompactString;
use llm::{Message, Role};
use serde::Deserialize;

/// System prompt used when the configuration does not override it.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Answer directly and completely.";

/// An incoming conversation turn as received from the caller.
///
/// `content` stays a raw JSON value until directive parsing: a string
/// is plain text, anything else resolves to empty content.
#[derive(Debug, Clone, Deserialize)]
pub struct WireMessage {
    /// The turn role.
    pub role: Role,
    /// The turn content.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl WireMessage {
    /// Convenience constructor for a plain-text turn.
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: serde_json::Value::String(content.into()),
        }
    }
}

/// The effective provider/model pair for one continuation session.
///
/// Fixed once resolved: a continuation never switches providers
/// mid-session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// The provider name.
    pub provider: CompactString,
    /// The model identifier.
    pub model: CompactString,
}

/// Build the outbound message list and resolve the route.
///
/// Every user turn has its directive stripped; the route follows the
/// *last* user turn carrying one. A recognized identifier selects its
/// provider, an unrecognized one falls back to the default pair (the
/// caller sees no warning, only the log does).
pub fn normalize(
    registry: &ProviderRegistry,
    default_route: &ResolvedRoute,
    system_prompt: &str,
    turns: &[WireMessage],
) -> (Vec<Message>, ResolvedRoute) {
    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(Message::system(system_prompt));
    let mut route = default_route.clone();

    for turn in turns {
        match turn.role {
            Role::User => {
                let parsed = directive::parse_value(&turn.content);
                if let Some(model) = parsed.model {
                    route = match registry.provider_of(&model) {
                        Some(provider) => ResolvedRoute {
                            provider: provider.clone(),
                            model,
                        },
                        None => {
                            tracing::warn!("unrecognized model directive '{model}', using default");
                            default_route.clone()
                        }
                    };
                }
                messages.push(Message::user(parsed.content));
            }
            role => {
                let content = turn.content.as_str().unwrap_or_default();
                messages.push(Message {
                    role,
                    content: content.to_owned(),
                });
            }
        }
    }

    (messages, route)
}
