// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hot-swappable selector shared across request handlers.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::selector::ResponseSelector;
use crate::table::ResponseTable;

/// A [`ResponseSelector`] behind an [`ArcSwap`].
///
/// Readers take a snapshot with [`SharedSelector::load`]; a replacement is
/// visible to the next read and never affects a selection already underway.
#[derive(Debug, Clone)]
pub struct SharedSelector {
    inner: Arc<ArcSwap<ResponseSelector>>,
}

impl SharedSelector {
    pub fn new(selector: ResponseSelector) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(selector)),
        }
    }

    /// Current selector snapshot.
    pub fn load(&self) -> Arc<ResponseSelector> {
        self.inner.load_full()
    }

    pub fn select_reply(&self, message: &str) -> String {
        self.inner.load().select_reply(message)
    }

    /// Swap in a new selector.
    pub fn replace(&self, selector: ResponseSelector) {
        self.inner.store(Arc::new(selector));
    }

    /// Swap in a new table, keeping the current random source.
    pub fn replace_table(&self, table: ResponseTable) {
        let rng = self.inner.load().random_source();
        info!(
            categories = table.categories().len(),
            match_mode = %table.match_mode(),
            "response table replaced"
        );
        self.replace(ResponseSelector::with_random_source(table, rng));
    }
}
