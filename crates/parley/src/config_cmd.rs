// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `parley config` subcommands and the shared config loading entry point.

use std::path::Path;

use colored::Colorize;
use parley_config::{ConfigError, ParleyConfig};
use parley_core::ParleyError;

/// Load and validate configuration from `path`, or from the standard
/// locations when no path is given.
pub fn load(path: Option<&Path>) -> Result<ParleyConfig, Vec<ConfigError>> {
    match path {
        Some(path) => parley_config::load_and_validate_path(path),
        None => parley_config::load_and_validate(),
    }
}

/// `parley config check`.
///
/// Loading already failed the process on invalid config, so reaching this
/// point means the configuration is valid.
pub fn check(config: &ParleyConfig) {
    println!("{}", "configuration is valid".green());
    println!(
        "  responder: {} categories, {} default responses, match_mode = {}",
        config.responder.categories.len(),
        config.responder.default_responses.len(),
        config.responder.match_mode,
    );
    println!(
        "  server:    {}:{}",
        config.server.host, config.server.port
    );
    let storage = if config.storage.enabled {
        config.storage.database_path.as_str()
    } else {
        "disabled"
    };
    println!("  storage:   {storage}");
}

/// `parley config show`.
pub fn show(config: &ParleyConfig) -> Result<(), ParleyError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ParleyError::Config(format!("failed to render configuration: {e}")))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        std::fs::write(&path, "[server]\nport = 4321\n").unwrap();
        let config = load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 4321);
    }

    #[test]
    fn invalid_file_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parley.toml");
        std::fs::write(&path, "[server]\nprot = 4321\n").unwrap();
        let errors = load(Some(&path)).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = ParleyConfig::default();
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed = parley_config::load_and_validate_str(&rendered).unwrap();
        assert_eq!(
            parsed.responder.categories.len(),
            config.responder.categories.len()
        );
        assert_eq!(parsed.server.port, config.server.port);
    }
}
