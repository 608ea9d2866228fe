// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply selection over a [`ResponseTable`].
//!
//! The message is lowercased and checked against every keyword, category by
//! category, in table order. The first hit wins and one of that category's
//! responses is drawn; with no hit, one of the default responses is drawn.
//! Selection never fails.

use std::sync::Arc;

use tracing::trace;

use crate::matcher::contains_keyword;
use crate::random::{RandomSource, ThreadRandom};
use crate::table::ResponseTable;

/// Outcome of a selection, borrowing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    /// The chosen reply.
    pub reply: &'a str,
    /// Matched category, `None` when a default reply was used.
    pub category: Option<&'a str>,
    /// The keyword that triggered the match.
    pub keyword: Option<&'a str>,
}

impl Selection<'_> {
    /// Whether a category matched.
    pub fn is_fallback(&self) -> bool {
        self.category.is_none()
    }
}

/// Chooses replies from an immutable table with an injectable random source.
pub struct ResponseSelector {
    table: ResponseTable,
    rng: Arc<dyn RandomSource>,
}

impl std::fmt::Debug for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseSelector")
            .field("categories", &self.table.categories().len())
            .field("default_responses", &self.table.default_responses().len())
            .field("match_mode", &self.table.match_mode())
            .finish()
    }
}

impl ResponseSelector {
    /// Create a selector drawing from the thread-local RNG.
    pub fn new(table: ResponseTable) -> Self {
        Self::with_random_source(table, Arc::new(ThreadRandom))
    }

    /// Create a selector with a specific random source.
    pub fn with_random_source(table: ResponseTable, rng: Arc<dyn RandomSource>) -> Self {
        Self { table, rng }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// The random source, shared so a rebuilt selector can reuse it.
    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        Arc::clone(&self.rng)
    }

    /// Select a reply and report which category (if any) produced it.
    pub fn select(&self, message: &str) -> Selection<'_> {
        let lowered = message.to_lowercase();
        let mode = self.table.match_mode();

        for category in self.table.categories() {
            if let Some(keyword) = category
                .keywords()
                .iter()
                .find(|k| contains_keyword(&lowered, k, mode))
            {
                trace!(category = category.name(), keyword = %keyword, "keyword matched");
                return Selection {
                    reply: self.draw(category.responses()),
                    category: Some(category.name()),
                    keyword: Some(keyword.as_str()),
                };
            }
        }

        trace!("no keyword matched, using default responses");
        Selection {
            reply: self.draw(self.table.default_responses()),
            category: None,
            keyword: None,
        }
    }

    /// Select a reply for `message`.
    pub fn select_reply(&self, message: &str) -> String {
        self.select(message).reply.to_string()
    }

    fn draw<'a>(&self, candidates: &'a [String]) -> &'a str {
        // Table invariants guarantee `candidates` is non-empty; the clamp keeps
        // a misbehaving random source from indexing out of bounds.
        let last = candidates.len() - 1;
        &candidates[self.rng.pick(candidates.len()).min(last)]
    }
}
