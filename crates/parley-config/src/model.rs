// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Parley.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::defaults;

/// Top-level Parley configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ParleyConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP/WebSocket listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Optional exchange history settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Response table and matching behavior.
    #[serde(default)]
    pub responder: ResponderConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in the REPL and the service banner.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "parley".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP/WebSocket listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origin. `None` or `"*"` allows any origin.
    #[serde(default)]
    pub cors_origin: Option<String>,

    /// Upper bound on a single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Exchange history configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Record exchanges to SQLite. Disabled by default.
    #[serde(default)]
    pub enabled: bool,

    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("parley").join("parley.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("parley.db"))
        .to_string_lossy()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// How a keyword has to appear in a message to count as a match.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchMode {
    /// Keyword may appear anywhere, including inside other words.
    #[default]
    Substring,
    /// Keyword must be bounded by non-alphanumeric characters or the string edges.
    WholeWord,
}

/// Response table and matching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Keyword matching strictness.
    #[serde(default)]
    pub match_mode: MatchMode,

    /// Artificial latency before each reply, in milliseconds. Demo only.
    #[serde(default)]
    pub reply_delay_ms: u64,

    /// Fallback replies used when no category matches.
    #[serde(default = "defaults::default_responses")]
    pub default_responses: Vec<String>,

    /// Categories in match-priority order.
    #[serde(default = "defaults::builtin_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            reply_delay_ms: 0,
            default_responses: defaults::default_responses(),
            categories: defaults::builtin_categories(),
        }
    }
}

/// One `[[responder.categories]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    /// Category name, unique within the table.
    pub name: String,

    /// Trigger keywords, checked in order.
    pub keywords: Vec<String>,

    /// Candidate replies.
    pub responses: Vec<String>,
}
