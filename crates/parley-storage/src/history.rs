// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`HistoryStore`].

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use parley_config::model::StorageConfig;
use parley_core::types::{Exchange, HealthStatus};
use parley_core::{HistoryStore, ParleyError};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed exchange history.
///
/// The database is opened lazily by [`SqliteHistory::initialize`]; every
/// other operation fails with a storage error until then.
pub struct SqliteHistory {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteHistory {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, ParleyError> {
        let history = Self::new(config);
        history.initialize().await?;
        Ok(history)
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), ParleyError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ParleyError::Storage {
            source: "history store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite history initialized");
        Ok(())
    }

    fn db(&self) -> Result<&Database, ParleyError> {
        self.db.get().ok_or_else(|| ParleyError::Storage {
            source: "history store not initialized, call initialize() first".into(),
        })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistory {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn record_exchange(&self, exchange: &Exchange) -> Result<(), ParleyError> {
        queries::exchanges::insert_exchange(self.db()?, exchange).await
    }

    async fn list_exchanges(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Exchange>, ParleyError> {
        queries::exchanges::list_exchanges(self.db()?, session_id, limit).await
    }

    async fn clear_session(&self, session_id: &str) -> Result<u64, ParleyError> {
        queries::exchanges::delete_session(self.db()?, session_id).await
    }

    /// Degraded when WAL was requested but SQLite kept another journal mode,
    /// as happens for in-memory databases.
    async fn health_check(&self) -> Result<HealthStatus, ParleyError> {
        let mode = self
            .db()?
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            })
            .await
            .map_err(map_tr_err)?;

        if self.config.wal_mode && !mode.eq_ignore_ascii_case("wal") {
            return Ok(HealthStatus::Degraded(format!(
                "journal mode is `{mode}`, expected `wal`"
            )));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn close(&self) -> Result<(), ParleyError> {
        match self.db.get() {
            Some(db) => db.checkpoint().await,
            None => Ok(()),
        }
    }
}
