// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exchange log operations.

use std::str::FromStr;

use parley_core::ParleyError;
use parley_core::types::{Channel, Exchange};
use rusqlite::types::Type;
use rusqlite::{Row, params};

use crate::database::{Database, map_tr_err};

const SELECT_COLUMNS: &str =
    "SELECT id, session_id, user_id, user_message, bot_reply, category, channel, created_at
     FROM exchanges WHERE session_id = ?1
     ORDER BY created_at ASC, rowid ASC";

fn row_to_exchange(row: &Row<'_>) -> Result<Exchange, rusqlite::Error> {
    let channel: String = row.get(6)?;
    let channel = Channel::from_str(&channel)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(Exchange {
        id: row.get(0)?,
        session_id: row.get(1)?,
        user_id: row.get(2)?,
        user_message: row.get(3)?,
        bot_reply: row.get(4)?,
        category: row.get(5)?,
        channel,
        created_at: row.get(7)?,
    })
}

/// Append an exchange.
pub async fn insert_exchange(db: &Database, exchange: &Exchange) -> Result<(), ParleyError> {
    let ex = exchange.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO exchanges (id, session_id, user_id, user_message, bot_reply, category, channel, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    ex.id,
                    ex.session_id,
                    ex.user_id,
                    ex.user_message,
                    ex.bot_reply,
                    ex.category,
                    ex.channel.to_string(),
                    ex.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Exchanges of a session in chronological order.
///
/// With `limit`, only the first `limit` rows are returned.
pub async fn list_exchanges(
    db: &Database,
    session_id: &str,
    limit: Option<i64>,
) -> Result<Vec<Exchange>, ParleyError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<Exchange>, rusqlite::Error> {
            let rows = match limit {
                Some(lim) => {
                    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} LIMIT ?2"))?;
                    stmt.query_map(params![session_id, lim], row_to_exchange)?
                        .collect::<Result<Vec<_>, _>>()?
                }
                None => {
                    let mut stmt = conn.prepare(SELECT_COLUMNS)?;
                    stmt.query_map(params![session_id], row_to_exchange)?
                        .collect::<Result<Vec<_>, _>>()?
                }
            };
            Ok(rows)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a session's exchanges, returning how many rows were removed.
pub async fn delete_session(db: &Database, session_id: &str) -> Result<u64, ParleyError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| -> Result<u64, rusqlite::Error> {
            let deleted = conn.execute(
                "DELETE FROM exchanges WHERE session_id = ?1",
                params![session_id],
            )?;
            Ok(deleted as u64)
        })
        .await
        .map_err(map_tr_err)
}
