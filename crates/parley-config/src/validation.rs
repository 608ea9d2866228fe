// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as a valid bind address and the response table invariants.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::ParleyConfig;

/// Largest accepted `responder.reply_delay_ms`.
pub const MAX_REPLY_DELAY_MS: u64 = 10_000;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ParleyConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.storage.enabled && config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty when storage is enabled"
                .to_string(),
        });
    }

    if config.responder.reply_delay_ms > MAX_REPLY_DELAY_MS {
        errors.push(ConfigError::Validation {
            message: format!(
                "responder.reply_delay_ms must be at most {MAX_REPLY_DELAY_MS}, got {}",
                config.responder.reply_delay_ms
            ),
        });
    }

    if config.responder.default_responses.is_empty() {
        errors.push(ConfigError::Validation {
            message: "responder.default_responses must contain at least one reply".to_string(),
        });
    }

    let mut seen_names = HashSet::new();
    for (i, category) in config.responder.categories.iter().enumerate() {
        let name = category.name.trim();
        if name.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("responder.categories[{i}].name must not be empty"),
            });
        } else if !seen_names.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate category name `{name}` in [[responder.categories]]"),
            });
        }

        if category.keywords.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("category `{name}` must have at least one keyword"),
            });
        }
        if category.keywords.iter().any(|k| k.is_empty()) {
            errors.push(ConfigError::Validation {
                message: format!("category `{name}` has an empty keyword"),
            });
        }
        if category.responses.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("category `{name}` must have at least one response"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
