// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the storage and gateway layers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by component health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Component is fully operational.
    Healthy,
    /// Component is operational but not configured as requested.
    Degraded(String),
}

/// Transport an exchange arrived on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// REST endpoint (`POST /api/messages`).
    Http,
    /// WebSocket connection.
    Ws,
    /// Local REPL.
    Cli,
}

/// One user message and the reply chosen for it.
///
/// This is the unit appended to the optional history log. Timestamps are
/// RFC 3339 strings so they sort lexicographically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    /// Unique exchange identifier (UUID v4).
    pub id: String,
    /// Session the exchange belongs to.
    pub session_id: String,
    /// Caller-supplied user identifier, if any.
    pub user_id: Option<String>,
    /// The raw message text as received.
    pub user_message: String,
    /// The reply returned to the caller.
    pub bot_reply: String,
    /// Name of the matched category, `None` when a default reply was used.
    pub category: Option<String>,
    /// Transport the exchange arrived on.
    pub channel: Channel,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}
