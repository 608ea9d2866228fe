// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-driven response selection for Parley.
//!
//! A [`ResponseTable`] holds ordered categories of keywords and candidate
//! replies plus a list of default replies. [`ResponseSelector`] picks a reply
//! for an incoming message, and [`SharedSelector`] lets a running server swap
//! the table without a restart.

pub mod matcher;
pub mod random;
pub mod selector;
pub mod shared;
pub mod table;

pub use random::{FixedIndex, RandomSource, Sequence, ThreadRandom};
pub use selector::{ResponseSelector, Selection};
pub use shared::SharedSelector;
pub use table::{Category, ResponseTable};
