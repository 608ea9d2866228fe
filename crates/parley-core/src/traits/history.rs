// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History store trait for the optional exchange log.

use async_trait::async_trait;

use crate::error::ParleyError;
use crate::types::{Exchange, HealthStatus};

/// Durable, append-only log of chat exchanges.
///
/// Writes are best-effort from the caller's point of view: the gateway logs
/// and discards any error returned by [`HistoryStore::record_exchange`].
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Short backend name used in logs and health output.
    fn name(&self) -> &str;

    /// Append one exchange.
    async fn record_exchange(&self, exchange: &Exchange) -> Result<(), ParleyError>;

    /// Exchanges for a session, oldest first, optionally capped at `limit` rows.
    async fn list_exchanges(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Exchange>, ParleyError>;

    /// Delete every exchange of a session, returning the number removed.
    async fn clear_session(&self, session_id: &str) -> Result<u64, ParleyError>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<HealthStatus, ParleyError>;

    /// Flush pending writes and release the backend.
    async fn close(&self) -> Result<(), ParleyError>;
}
