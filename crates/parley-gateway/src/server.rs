// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware and shared state, and runs the listener until
//! the shutdown token is cancelled.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use parley_config::model::ServerConfig;
use parley_core::{HistoryStore, ParleyError};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;
use crate::reply::ReplyService;
use crate::ws;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Reply generation.
    pub replies: ReplyService,
    /// Exchange history, `None` when storage is disabled.
    pub history: Option<Arc<dyn HistoryStore>>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(replies: ReplyService, history: Option<Arc<dyn HistoryStore>>) -> Self {
        Self {
            replies,
            history,
            start_time: Instant::now(),
        }
    }
}

/// Build the CORS layer for `cors_origin`.
///
/// `None` or `"*"` allows any origin; anything else is the single allowed origin.
pub fn cors_layer(cors_origin: Option<&str>) -> Result<CorsLayer, ParleyError> {
    match cors_origin {
        None | Some("*") => Ok(CorsLayer::permissive()),
        Some(origin) => {
            let origin = HeaderValue::from_str(origin)
                .map_err(|e| ParleyError::Config(format!("invalid cors_origin `{origin}`: {e}")))?;
            Ok(CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]))
        }
    }
}

/// Assemble the application router.
///
/// Routes:
/// - GET / and GET /health
/// - POST /api/messages
/// - GET, DELETE /api/messages/{session_id}
/// - GET /ws
pub fn router(state: GatewayState, cors_origin: Option<&str>) -> Result<Router, ParleyError> {
    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/messages", axum::routing::post(handlers::post_message))
        .route(
            "/api/messages/{session_id}",
            get(handlers::get_history).delete(handlers::delete_history),
        )
        .route("/ws", get(ws::ws_handler))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors_layer(cors_origin)?)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

/// Bind the configured address.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ParleyError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| ParleyError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })
}

/// Serve `app` on `listener` until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: CancellationToken,
) -> Result<(), ParleyError> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "gateway listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| ParleyError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("gateway stopped");
    Ok(())
}
