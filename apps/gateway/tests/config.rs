//! Gateway configuration tests.

use weft_gateway::{GatewayConfig, utils::expand_env_vars};

#[test]
fn defaults_when_empty() {
    let config = GatewayConfig::from_toml("").expect("empty config");
    assert_eq!(config.server.bind, "127.0.0.1:8080");
    assert_eq!(config.llm.provider, "openai");
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.max_continuations, 2);
    assert!(config.llm.max_tokens.is_none());
    assert!(config.llm.system_prompt.is_none());
    assert!(config.discovery.enabled);
    assert_eq!(config.discovery.base_url, "http://localhost:11434");
}

#[test]
fn parses_full_config() {
    let toml = r#"
[server]
bind = "0.0.0.0:9000"

[llm]
provider = "deepseek"
model = "deepseek-chat"
max_continuations = 4
max_tokens = 2048
system_prompt = "Answer in haiku."

[discovery]
enabled = false
base_url = "http://inference.local:11434"
"#;
    let config = GatewayConfig::from_toml(toml).expect("full config");
    assert_eq!(config.server.bind, "0.0.0.0:9000");
    assert_eq!(config.llm.provider, "deepseek");
    assert_eq!(config.llm.model, "deepseek-chat");
    assert_eq!(config.llm.max_continuations, 4);
    assert_eq!(config.llm.max_tokens, Some(2048));
    assert_eq!(config.llm.system_prompt.as_deref(), Some("Answer in haiku."));
    assert!(!config.discovery.enabled);
    assert_eq!(config.discovery.base_url, "http://inference.local:11434");
}

#[test]
fn expands_set_env_vars() {
    let path = std::env::var("PATH").expect("PATH set in test environment");
    assert_eq!(expand_env_vars("${PATH}"), path);
}

#[test]
fn unknown_env_vars_expand_to_empty() {
    assert_eq!(expand_env_vars("a${WEFT_TEST_NOT_SET_XYZ}b"), "ab");
}

#[test]
fn unterminated_pattern_is_kept() {
    assert_eq!(expand_env_vars("bind = ${HOST"), "bind = ${HOST");
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gateway.toml");
    std::fs::write(&path, "[llm]\nmodel = \"gpt-4o\"\n").expect("write config");

    let config = GatewayConfig::load(&path).expect("load config");
    assert_eq!(config.llm.model, "gpt-4o");
    // Untouched sections keep their defaults.
    assert_eq!(config.server.bind, "127.0.0.1:8080");
}
