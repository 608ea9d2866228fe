// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use parley_gateway::{WsOutgoing, router, serve};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use common::{MemoryHistory, state};

async fn start(history: Option<Arc<dyn parley_core::HistoryStore>>) -> (String, CancellationToken) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state(history), None).unwrap();
    let token = CancellationToken::new();
    tokio::spawn(serve(listener, app, token.clone()));
    (format!("ws://{addr}/ws"), token)
}

async fn next_event<S>(stream: &mut S) -> WsOutgoing
where
    S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    loop {
        let msg = stream.next().await.unwrap().unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

#[tokio::test]
async fn websocket_replies_and_survives_errors() {
    let history = Arc::new(MemoryHistory::default());
    let (url, token) = start(Some(history.clone())).await;
    let (socket, _) = tokio_tungstenite::connect_async(url).await.unwrap();
    let (mut tx, mut rx) = socket.split();

    tx.send(Message::text(r#"{"type":"message","message":"hi","sessionId":"ws-1"}"#))
        .await
        .unwrap();
    match next_event(&mut rx).await {
        WsOutgoing::Reply { category, .. } => assert_eq!(category.as_deref(), Some("greetings")),
        other => panic!("unexpected event {other:?}"),
    }

    tx.send(Message::text("not json")).await.unwrap();
    assert_eq!(
        next_event(&mut rx).await,
        WsOutgoing::Error {
            message: "Error processing your request".to_string()
        }
    );

    // Empty input is not rejected on this transport.
    tx.send(Message::text(r#"{"type":"message"}"#)).await.unwrap();
    match next_event(&mut rx).await {
        WsOutgoing::Reply { category, .. } => assert_eq!(category, None),
        other => panic!("unexpected event {other:?}"),
    }

    tx.send(Message::Close(None)).await.unwrap();
    token.cancel();

    let rows = history.rows.lock().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].session_id, "ws-1");
    assert_eq!(rows[0].channel, parley_core::Channel::Ws);
}
