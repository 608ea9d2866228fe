// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use parley_core::types::{Exchange, HealthStatus};
use parley_core::{HistoryStore, ParleyError};
use parley_gateway::{GatewayState, ReplyService};
use parley_responder::{FixedIndex, ResponseSelector, ResponseTable, SharedSelector};

/// Selector over the built-in table that always picks the first response.
pub fn deterministic_replies() -> ReplyService {
    let selector = ResponseSelector::with_random_source(
        ResponseTable::builtin().unwrap(),
        Arc::new(FixedIndex(0)),
    );
    ReplyService::new(SharedSelector::new(selector))
}

pub fn state(history: Option<Arc<dyn HistoryStore>>) -> GatewayState {
    GatewayState::new(deterministic_replies(), history)
}

/// History kept in a vector.
#[derive(Default)]
pub struct MemoryHistory {
    pub rows: Mutex<Vec<Exchange>>,
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    fn name(&self) -> &str {
        "memory"
    }

    async fn record_exchange(&self, exchange: &Exchange) -> Result<(), ParleyError> {
        self.rows.lock().unwrap().push(exchange.clone());
        Ok(())
    }

    async fn list_exchanges(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Exchange>, ParleyError> {
        let rows = self.rows.lock().unwrap();
        let matching = rows.iter().filter(|e| e.session_id == session_id).cloned();
        Ok(match limit {
            Some(n) => matching.take(n as usize).collect(),
            None => matching.collect(),
        })
    }

    async fn clear_session(&self, session_id: &str) -> Result<u64, ParleyError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|e| e.session_id != session_id);
        Ok((before - rows.len()) as u64)
    }

    async fn health_check(&self) -> Result<HealthStatus, ParleyError> {
        Ok(HealthStatus::Healthy)
    }

    async fn close(&self) -> Result<(), ParleyError> {
        Ok(())
    }
}

/// History whose every operation fails.
pub struct BrokenHistory;

fn broken() -> ParleyError {
    ParleyError::Storage {
        source: "disk on fire".into(),
    }
}

#[async_trait]
impl HistoryStore for BrokenHistory {
    fn name(&self) -> &str {
        "broken"
    }

    async fn record_exchange(&self, _exchange: &Exchange) -> Result<(), ParleyError> {
        Err(broken())
    }

    async fn list_exchanges(
        &self,
        _session_id: &str,
        _limit: Option<i64>,
    ) -> Result<Vec<Exchange>, ParleyError> {
        Err(broken())
    }

    async fn clear_session(&self, _session_id: &str) -> Result<u64, ParleyError> {
        Err(broken())
    }

    async fn health_check(&self) -> Result<HealthStatus, ParleyError> {
        Err(broken())
    }

    async fn close(&self) -> Result<(), ParleyError> {
        Ok(())
    }
}
