// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword occurrence tests for the two match modes.

use parley_config::model::MatchMode;

/// Whether `keyword` occurs in `haystack` under `mode`.
///
/// Both arguments must already be lowercase.
pub fn contains_keyword(haystack: &str, keyword: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => haystack.contains(keyword),
        MatchMode::WholeWord => contains_whole_word(haystack, keyword),
    }
}

fn contains_whole_word(haystack: &str, keyword: &str) -> bool {
    haystack.match_indices(keyword).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + keyword.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
