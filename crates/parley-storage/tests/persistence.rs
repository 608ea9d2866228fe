// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use parley_config::model::StorageConfig;
use parley_core::types::{Channel, Exchange};
use parley_core::HistoryStore;
use parley_storage::SqliteHistory;
use tempfile::tempdir;

fn exchange(id: &str, session: &str, channel: Channel) -> Exchange {
    Exchange {
        id: id.to_string(),
        session_id: session.to_string(),
        user_id: None,
        user_message: "thanks".to_string(),
        bot_reply: "You're welcome!".to_string(),
        category: None,
        channel,
        created_at: format!("2026-03-01T12:00:00.{id:0>3}Z"),
    }
}

#[tokio::test]
async fn exchanges_survive_reopen() {
    let dir = tempdir().unwrap();
    let config = StorageConfig {
        enabled: true,
        database_path: dir.path().join("history.db").to_string_lossy().to_string(),
        wal_mode: true,
    };

    let history = SqliteHistory::open(config.clone()).await.unwrap();
    history.record_exchange(&exchange("1", "s", Channel::Http)).await.unwrap();
    history.record_exchange(&exchange("2", "s", Channel::Cli)).await.unwrap();
    history.close().await.unwrap();
    drop(history);

    let reopened = SqliteHistory::open(config).await.unwrap();
    let rows = reopened.list_exchanges("s", None).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].channel, Channel::Http);
    assert_eq!(rows[1].channel, Channel::Cli);
    assert_eq!(rows[1].category, None);
}

#[tokio::test]
async fn concurrent_writers_are_serialized() {
    let dir = tempdir().unwrap();
    let config = StorageConfig {
        enabled: true,
        database_path: dir.path().join("concurrent.db").to_string_lossy().to_string(),
        wal_mode: true,
    };
    let history = std::sync::Arc::new(SqliteHistory::open(config).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..20 {
        let history = history.clone();
        handles.push(tokio::spawn(async move {
            history
                .record_exchange(&exchange(&i.to_string(), "busy", Channel::Ws))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(history.list_exchanges("busy", None).await.unwrap().len(), 20);
    assert_eq!(history.list_exchanges("busy", Some(5)).await.unwrap().len(), 5);
}
