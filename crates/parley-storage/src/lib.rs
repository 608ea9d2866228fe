// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite exchange history for Parley.
//!
//! A single `exchanges` table, managed by embedded refinery migrations and
//! accessed through tokio-rusqlite's background thread.

pub mod database;
pub mod history;
pub mod migrations;
pub mod queries;

pub use database::Database;
pub use history::SqliteHistory;
