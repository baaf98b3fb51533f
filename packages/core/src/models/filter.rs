//! Per-depth filter text
//!
//! The taxonomy table has one search box per named level. A term typed into
//! a level's box is only ever compared against names at that depth.

use serde::{Deserialize, Serialize};

/// Number of depth levels that carry a dedicated filter
pub const FILTER_LEVEL_COUNT: usize = 3;

/// Named taxonomy levels that own a search box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterLevel {
    /// Depth 0, e.g. "Fruit Trees"
    Category,
    /// Depth 1, e.g. "Apple"
    SubCategory,
    /// Depth 2, e.g. "Gala"
    Species,
}

impl FilterLevel {
    pub const ALL: [FilterLevel; FILTER_LEVEL_COUNT] =
        [FilterLevel::Category, FilterLevel::SubCategory, FilterLevel::Species];

    /// Tree depth this level filters
    pub fn depth(self) -> usize {
        match self {
            FilterLevel::Category => 0,
            FilterLevel::SubCategory => 1,
            FilterLevel::Species => 2,
        }
    }

    /// Level owning `depth`, if any
    pub fn from_depth(depth: usize) -> Option<Self> {
        Self::ALL.get(depth).copied()
    }
}

/// Search text for each named level. Empty text means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub species: String,
}

impl FilterState {
    pub fn new(
        category: impl Into<String>,
        sub_category: impl Into<String>,
        species: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            sub_category: sub_category.into(),
            species: species.into(),
        }
    }

    /// Filter with only `level` set
    pub fn only(level: FilterLevel, text: impl Into<String>) -> Self {
        let mut filter = Self::default();
        filter.set(level, text);
        filter
    }

    pub fn get(&self, level: FilterLevel) -> &str {
        match level {
            FilterLevel::Category => &self.category,
            FilterLevel::SubCategory => &self.sub_category,
            FilterLevel::Species => &self.species,
        }
    }

    pub fn set(&mut self, level: FilterLevel, text: impl Into<String>) {
        let text = text.into();
        match level {
            FilterLevel::Category => self.category = text,
            FilterLevel::SubCategory => self.sub_category = text,
            FilterLevel::Species => self.species = text,
        }
    }

    /// True when at least one level has non-empty text
    pub fn is_active(&self) -> bool {
        FilterLevel::ALL
            .iter()
            .any(|level| !self.get(*level).is_empty())
    }

    /// Lowercased needle for `depth`, or `None` when that depth is unfiltered
    pub fn needle_for_depth(&self, depth: usize) -> Option<String> {
        let text = self.get(FilterLevel::from_depth(depth)?);
        if text.is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        }
    }

    /// Case-insensitive substring match of `name` against the filter for `depth`.
    ///
    /// Depths without a non-empty filter never match.
    pub fn matches(&self, depth: usize, name: &str) -> bool {
        self.needle_for_depth(depth)
            .is_some_and(|needle| name.to_lowercase().contains(&needle))
    }
}
