// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the REST API.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use parley_core::types::{Channel, Exchange, HealthStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::server::GatewayState;

/// Current time as an RFC 3339 string with millisecond precision.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Request body for POST /api/messages.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response body for POST /api/messages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub user_message: String,
    pub reply: String,
    /// Matched category, `null` for a default reply.
    pub category: Option<String>,
    pub session_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub session_id: String,
    pub messages: Vec<Exchange>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
    pub deleted: u64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// `ok`, `disabled`, or `degraded: <reason>`.
    pub storage: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub api: &'static str,
    pub websocket: &'static str,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

/// Error envelope shared by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Build an error response.
pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.into(),
        }),
    )
        .into_response()
}

/// GET /
pub async fn index() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Parley reply service is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: Endpoints {
            health: "/health",
            api: "/api/messages",
            websocket: "/ws",
        },
    })
}

/// GET /health
///
/// Always 200 while the process is serving; storage problems are reported in
/// the `storage` field only.
pub async fn health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let storage = match &state.history {
        None => "disabled".to_string(),
        Some(history) => match history.health_check().await {
            Ok(HealthStatus::Healthy) => "ok".to_string(),
            Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
            Err(e) => format!("degraded: {e}"),
        },
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        storage,
        timestamp: timestamp(),
    })
}

/// POST /api/messages
pub async fn post_message(
    State(state): State<GatewayState>,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!(error = %rejection, "rejected message body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let message = match body.message {
        Some(m) if !m.trim().is_empty() => m,
        _ => return error_response(StatusCode::BAD_REQUEST, "Message cannot be empty"),
    };

    let reply = match state.replies.reply(message.clone()).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "failed to process message");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to process message",
            );
        }
    };

    let session_id = body
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let now = timestamp();

    record(
        &state,
        Exchange {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.clone(),
            user_id: body.user_id,
            user_message: message.clone(),
            bot_reply: reply.text.clone(),
            category: reply.category.clone(),
            channel: Channel::Http,
            created_at: now.clone(),
        },
    )
    .await;

    (
        StatusCode::OK,
        Json(MessageResponse {
            success: true,
            user_message: message,
            reply: reply.text,
            category: reply.category,
            session_id,
            timestamp: now,
        }),
    )
        .into_response()
}

/// Append to history if enabled. Failures are logged and dropped.
pub(crate) async fn record(state: &GatewayState, exchange: Exchange) {
    if let Some(history) = &state.history
        && let Err(e) = history.record_exchange(&exchange).await
    {
        warn!(
            session_id = %exchange.session_id,
            error = %e,
            "failed to record exchange"
        );
    }
}

/// GET /api/messages/{session_id}
pub async fn get_history(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid query parameters");
    };

    let messages = match &state.history {
        None => Vec::new(),
        Some(history) => match history.list_exchanges(&session_id, query.limit).await {
            Ok(messages) => messages,
            Err(e) => {
                error!(session_id = %session_id, error = %e, "failed to retrieve messages");
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve messages",
                );
            }
        },
    };

    (
        StatusCode::OK,
        Json(HistoryResponse {
            success: true,
            session_id,
            messages,
        }),
    )
        .into_response()
}

/// DELETE /api/messages/{session_id}
pub async fn delete_history(
    State(state): State<GatewayState>,
    Path(session_id): Path<String>,
) -> Response {
    let deleted = match &state.history {
        None => 0,
        Some(history) => match history.clear_session(&session_id).await {
            Ok(n) => n,
            Err(e) => {
                error!(session_id = %session_id, error = %e, "failed to clear messages");
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to clear messages",
                );
            }
        },
    };

    (
        StatusCode::OK,
        Json(ClearResponse {
            success: true,
            message: format!("Message history cleared for session {session_id}"),
            deleted,
        }),
    )
        .into_response()
}

pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}
