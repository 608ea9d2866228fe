// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the gateway and its optional collaborators.

pub mod history;

pub use history::HistoryStore;
