// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response table: ordered categories plus the fallback replies.
//!
//! A table is validated once at construction and is immutable afterwards.

use std::collections::HashSet;

use parley_config::model::{CategoryConfig, MatchMode, ResponderConfig};
use parley_core::ParleyError;

/// A named group of keywords sharing a set of candidate replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    keywords: Vec<String>,
    responses: Vec<String>,
}

impl Category {
    /// Build a category. Keywords are case-folded to lowercase.
    ///
    /// Fails if the name is blank, there are no keywords or no responses,
    /// or a keyword is empty.
    pub fn new(
        name: impl Into<String>,
        keywords: Vec<String>,
        responses: Vec<String>,
    ) -> Result<Self, ParleyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ParleyError::InvalidTable(
                "category name must not be empty".to_string(),
            ));
        }
        if keywords.is_empty() {
            return Err(ParleyError::InvalidTable(format!(
                "category `{name}` has no keywords"
            )));
        }
        if responses.is_empty() {
            return Err(ParleyError::InvalidTable(format!(
                "category `{name}` has no responses"
            )));
        }

        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(ParleyError::InvalidTable(format!(
                "category `{name}` has an empty keyword"
            )));
        }

        Ok(Self {
            name,
            keywords,
            responses,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase keywords in declaration order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }
}

impl TryFrom<&CategoryConfig> for Category {
    type Error = ParleyError;

    fn try_from(config: &CategoryConfig) -> Result<Self, Self::Error> {
        Category::new(
            config.name.clone(),
            config.keywords.clone(),
            config.responses.clone(),
        )
    }
}

/// Ordered categories, fallback replies and the keyword match mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseTable {
    categories: Vec<Category>,
    default_responses: Vec<String>,
    match_mode: MatchMode,
}

impl ResponseTable {
    /// Build a table. Category order is match priority.
    pub fn new(
        categories: Vec<Category>,
        default_responses: Vec<String>,
        match_mode: MatchMode,
    ) -> Result<Self, ParleyError> {
        if default_responses.is_empty() {
            return Err(ParleyError::InvalidTable(
                "default responses must not be empty".to_string(),
            ));
        }

        // Names are compared trimmed, the same rule config validation applies.
        let mut seen = HashSet::new();
        for category in &categories {
            let name = category.name().trim();
            if !seen.insert(name) {
                return Err(ParleyError::InvalidTable(format!(
                    "duplicate category name `{name}`"
                )));
            }
        }

        Ok(Self {
            categories,
            default_responses,
            match_mode,
        })
    }

    /// Build a table from the `[responder]` configuration section.
    pub fn from_config(config: &ResponderConfig) -> Result<Self, ParleyError> {
        let categories = config
            .categories
            .iter()
            .map(Category::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(
            categories,
            config.default_responses.clone(),
            config.match_mode,
        )
    }

    /// The compiled-in table.
    pub fn builtin() -> Result<Self, ParleyError> {
        Self::from_config(&ResponderConfig::default())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn default_responses(&self) -> &[String] {
        &self.default_responses
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }
}
