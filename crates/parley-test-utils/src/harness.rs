// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full service stack (selector, reply service,
//! temp SQLite history and the axum router) and offers helpers that drive a
//! message through it.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use parley_config::ParleyConfig;
use parley_core::{HistoryStore, ParleyError};
use parley_gateway::{GatewayState, Reply, ReplyService};
use parley_responder::{
    FixedIndex, RandomSource, ResponseSelector, ResponseTable, Sequence, SharedSelector,
};
use parley_storage::SqliteHistory;
use serde_json::Value;
use tower::ServiceExt;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config_toml: Option<String>,
    indices: Option<Vec<usize>>,
    storage: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config_toml: None,
            indices: None,
            storage: true,
        }
    }

    /// Use configuration parsed from TOML instead of the defaults.
    pub fn with_config_toml(mut self, toml: &str) -> Self {
        self.config_toml = Some(toml.to_string());
        self
    }

    /// Draw response indices from this cycling list instead of always index 0.
    pub fn with_random_indices(mut self, indices: Vec<usize>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Run without a history store.
    pub fn without_storage(mut self) -> Self {
        self.storage = false;
        self
    }

    /// Build the harness, creating a temp database if storage is on.
    pub async fn build(self) -> Result<TestHarness, ParleyError> {
        let mut config = match self.config_toml {
            Some(toml) => parley_config::load_and_validate_str(&toml).map_err(|errors| {
                ParleyError::Config(
                    errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            })?,
            None => ParleyConfig::default(),
        };

        let temp_dir = tempfile::TempDir::new().map_err(ParleyError::storage)?;
        let history = if self.storage {
            config.storage.enabled = true;
            config.storage.database_path =
                temp_dir.path().join("test.db").to_string_lossy().to_string();
            Some(Arc::new(SqliteHistory::open(config.storage.clone()).await?))
        } else {
            config.storage.enabled = false;
            None
        };

        let rng: Arc<dyn RandomSource> = match self.indices {
            Some(indices) => Arc::new(Sequence::new(indices)),
            None => Arc::new(FixedIndex(0)),
        };
        let table = ResponseTable::from_config(&config.responder)?;
        let selector = SharedSelector::new(ResponseSelector::with_random_source(table, rng));
        let replies = ReplyService::from_config(selector.clone(), &config);

        Ok(TestHarness {
            config,
            selector,
            replies,
            history,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with deterministic selection and temp storage.
pub struct TestHarness {
    /// Effective configuration.
    pub config: ParleyConfig,
    /// The shared selector, replaceable mid-test.
    pub selector: SharedSelector,
    pub replies: ReplyService,
    /// SQLite history (temp DB, removed on drop), if enabled.
    pub history: Option<Arc<SqliteHistory>>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Gateway state wired to this harness.
    pub fn state(&self) -> GatewayState {
        let history = self
            .history
            .clone()
            .map(|h| h as Arc<dyn HistoryStore>);
        GatewayState::new(self.replies.clone(), history)
    }

    /// The application router.
    pub fn router(&self) -> Result<Router, ParleyError> {
        parley_gateway::router(self.state(), self.config.server.cors_origin.as_deref())
    }

    /// Ask the reply service directly.
    pub async fn send_message(&self, text: &str) -> Result<Reply, ParleyError> {
        self.replies.reply(text.to_string()).await
    }

    /// Send a request through the router and decode the JSON body.
    pub async fn request(&self, request: Request<Body>) -> Result<(StatusCode, Value), ParleyError> {
        let response = self
            .router()?
            .oneshot(request)
            .await
            .map_err(|e| ParleyError::Internal(e.to_string()))?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ParleyError::Internal(e.to_string()))?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ParleyError::Internal(e.to_string()))?
        };
        Ok((status, body))
    }

    /// POST /api/messages with the given text and optional session.
    pub async fn post_message(
        &self,
        text: &str,
        session_id: Option<&str>,
    ) -> Result<(StatusCode, Value), ParleyError> {
        let mut payload = serde_json::json!({ "message": text });
        if let Some(id) = session_id {
            payload["sessionId"] = Value::String(id.to_string());
        }
        let request = Request::builder()
            .method("POST")
            .uri("/api/messages")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .map_err(|e| ParleyError::Internal(e.to_string()))?;
        self.request(request).await
    }

    /// GET /api/messages/{session_id}
    pub async fn get_history(&self, session_id: &str) -> Result<(StatusCode, Value), ParleyError> {
        let request = Request::builder()
            .uri(format!("/api/messages/{session_id}"))
            .body(Body::empty())
            .map_err(|e| ParleyError::Internal(e.to_string()))?;
        self.request(request).await
    }
}
