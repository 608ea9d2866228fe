// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket transport.
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "message", "message": "hello", "sessionId": "optional"}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"type": "reply", "message": "Hi there!", "category": "greetings", "timestamp": "..."}
//! {"type": "error", "message": "Error processing your request"}
//! ```
//!
//! Unlike the REST route, an empty or missing `message` is not rejected; it
//! simply gets a default reply.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use parley_core::types::{Channel, Exchange};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::handlers::{record, timestamp};
use crate::server::GatewayState;

/// Error text sent for any frame that could not be answered.
pub const PROCESSING_ERROR: &str = "Error processing your request";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WsIncoming {
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

fn default_kind() -> String {
    "message".to_string()
}

/// Server -> client events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WsOutgoing {
    Reply {
        message: String,
        category: Option<String>,
        timestamp: String,
    },
    Error {
        message: String,
    },
}

impl WsOutgoing {
    fn processing_error() -> Self {
        WsOutgoing::Error {
            message: PROCESSING_ERROR.to_string(),
        }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Drive one connection until the client closes it.
///
/// Outgoing events go through an mpsc channel drained by a dedicated sender
/// task; the receive loop answers frames one at a time.
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();
    debug!(connection_id = %connection_id, "websocket connected");

    let (tx, mut rx) = mpsc::channel::<String>(64);
    let sender_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_receiver.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let event = answer(&state, &connection_id, text.as_str()).await;
        let payload = match serde_json::to_string(&event) {
            Ok(p) => p,
            Err(e) => {
                error!(error = %e, "failed to serialize websocket event");
                continue;
            }
        };
        if tx.send(payload).await.is_err() {
            break;
        }
    }

    drop(tx);
    if let Err(e) = sender_task.await {
        warn!(error = %e, "websocket sender task failed");
    }
    debug!(connection_id = %connection_id, "websocket disconnected");
}

async fn answer(state: &GatewayState, connection_id: &str, text: &str) -> WsOutgoing {
    let incoming: WsIncoming = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "invalid websocket frame");
            return WsOutgoing::processing_error();
        }
    };
    if incoming.kind != "message" {
        warn!(kind = %incoming.kind, "unsupported websocket event type");
        return WsOutgoing::processing_error();
    }

    let message = incoming.message.unwrap_or_default();
    let reply = match state.replies.reply(message.clone()).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "failed to process websocket message");
            return WsOutgoing::processing_error();
        }
    };

    let now = timestamp();
    record(
        state,
        Exchange {
            id: uuid::Uuid::new_v4().to_string(),
            session_id: incoming
                .session_id
                .unwrap_or_else(|| connection_id.to_string()),
            user_id: None,
            user_message: message,
            bot_reply: reply.text.clone(),
            category: reply.category.clone(),
            channel: Channel::Ws,
            created_at: now.clone(),
        },
    )
    .await;

    WsOutgoing::Reply {
        message: reply.text,
        category: reply.category,
        timestamp: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_defaults() {
        let msg: WsIncoming = serde_json::from_str("{}").unwrap();
        assert_eq!(msg.kind, "message");
        assert!(msg.message.is_none());
        assert!(msg.session_id.is_none());
    }

    #[test]
    fn incoming_with_all_fields() {
        let msg: WsIncoming =
            serde_json::from_str(r#"{"type":"message","message":"hi","sessionId":"s-1"}"#)
                .unwrap();
        assert_eq!(msg.message.as_deref(), Some("hi"));
        assert_eq!(msg.session_id.as_deref(), Some("s-1"));
    }

    #[test]
    fn outgoing_reply_shape() {
        let json = serde_json::to_value(WsOutgoing::Reply {
            message: "Hello!".to_string(),
            category: Some("greetings".to_string()),
            timestamp: "t".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "reply");
        assert_eq!(json["message"], "Hello!");
        assert_eq!(json["category"], "greetings");
    }

    #[test]
    fn outgoing_error_shape() {
        let json = serde_json::to_string(&WsOutgoing::processing_error()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"error","message":"Error processing your request"}"#
        );
    }
}
