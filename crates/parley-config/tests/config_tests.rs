// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Parley configuration system.

use parley_config::diagnostic::ConfigError;
use parley_config::model::{MatchMode, ParleyConfig};
use parley_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_parley_config() {
    let toml = r#"
[agent]
name = "helpdesk"
log_level = "debug"

[server]
host = "0.0.0.0"
port = 8080
cors_origin = "https://chat.example.com"
request_timeout_secs = 10

[storage]
enabled = true
database_path = "/tmp/parley-test.db"
wal_mode = false

[responder]
match_mode = "whole_word"
reply_delay_ms = 150
default_responses = ["I didn't understand."]

[[responder.categories]]
name = "greetings"
keywords = ["hello", "hi"]
responses = ["Hello!", "Hi there!"]
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helpdesk");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(
        config.server.cors_origin.as_deref(),
        Some("https://chat.example.com")
    );
    assert_eq!(config.server.request_timeout_secs, 10);
    assert!(config.storage.enabled);
    assert_eq!(config.storage.database_path, "/tmp/parley-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.responder.match_mode, MatchMode::WholeWord);
    assert_eq!(config.responder.reply_delay_ms, 150);
    assert_eq!(config.responder.default_responses, vec!["I didn't understand."]);
    assert_eq!(config.responder.categories.len(), 1);
    assert_eq!(config.responder.categories[0].keywords, vec!["hello", "hi"]);
}

/// A file that only sets `[server]` keeps the built-in response table.
#[test]
fn partial_config_keeps_builtin_table() {
    let config = load_config_from_str("[server]\nport = 9000\n").unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.responder.categories.len(), 6);
    assert_eq!(config.responder.categories[0].name, "greetings");
    assert_eq!(config.responder.default_responses.len(), 5);
    assert_eq!(config.responder.match_mode, MatchMode::Substring);
}

/// Declaring categories replaces the built-in list instead of appending to it.
#[test]
fn categories_replace_builtin_list() {
    let toml = r#"
[[responder.categories]]
name = "weather"
keywords = ["rain"]
responses = ["Bring an umbrella."]
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.responder.categories.len(), 1);
    assert_eq!(config.responder.categories[0].name, "weather");
}

#[test]
fn empty_config_equals_defaults() {
    let config = load_config_from_str("").unwrap();
    let defaults = ParleyConfig::default();
    assert_eq!(config.agent.name, defaults.agent.name);
    assert_eq!(config.server.port, 3000);
    assert!(!config.storage.enabled);
}

#[test]
fn unknown_key_produces_suggestion() {
    let errors = load_and_validate_str("[server]\nprot = 3000\n").unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "prot");
            assert_eq!(suggestion.as_deref(), Some("port"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_key_in_category_is_rejected() {
    let toml = r#"
[[responder.categories]]
name = "x"
keywrds = ["a"]
keywords = ["a"]
responses = ["b"]
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::UnknownKey { suggestion, .. } if suggestion.as_deref() == Some("keywords"))
    ));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[server]\nport = \"eighty\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))));
}

#[test]
fn unknown_match_mode_is_reported() {
    let errors = load_and_validate_str("[responder]\nmatch_mode = \"fuzzy\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidValue { detail, .. } if detail.contains("fuzzy"))));
}

#[test]
fn missing_category_field_is_reported() {
    let toml = r#"
[[responder.categories]]
name = "x"
keywords = ["a"]
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::MissingKey { key } if key.ends_with("responses"))));
}

#[test]
fn semantic_validation_runs_after_parse() {
    let toml = r#"
[responder]
default_responses = []
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("default_responses"))));
}

#[test]
fn explicit_path_loads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[agent]\nname = \"from-file\"\n").unwrap();
    let config = load_and_validate_path(&path).unwrap();
    assert_eq!(config.agent.name, "from-file");
}

#[test]
fn explicit_path_errors_carry_source_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[agent]\nnaem = \"x\"\n").unwrap();
    let errors = load_and_validate_path(&path).unwrap_err();
    match &errors[0] {
        ConfigError::UnknownKey { span, src, .. } => {
            assert!(span.is_some());
            assert!(src.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}
