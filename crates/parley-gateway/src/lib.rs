// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for Parley.
//!
//! Exposes the reply service over a small REST API and a WebSocket endpoint.
//! Both transports share one [`ReplyService`] and, when storage is enabled,
//! one [`HistoryStore`](parley_core::HistoryStore).

pub mod handlers;
pub mod reply;
pub mod server;
pub mod ws;

pub use reply::{Reply, ReplyService};
pub use server::{GatewayState, bind, cors_layer, router, serve};
pub use ws::WsOutgoing;
