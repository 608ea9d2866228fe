// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Parley.
//!
//! Provides the error type, the exchange record and the [`HistoryStore`]
//! trait shared by the storage backend and the gateway.

pub mod error;
pub mod traits;
pub mod types;

pub use error::ParleyError;
pub use traits::HistoryStore;
pub use types::{Channel, Exchange, HealthStatus};
