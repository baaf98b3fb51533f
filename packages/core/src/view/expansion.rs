//! Expansion Synchronizer
//!
//! Owns the set of open category ids. While a filter is active the set is
//! derived entirely from the filter result and manual toggles are ignored.
//! When the filter is cleared the set collapses to empty; the manual state
//! from before the filter session is not restored.

use crate::tree::CategoryTree;
use crate::view::Visibility;
use std::collections::HashSet;

/// Open categories for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: HashSet<String>,
    filter_driven: bool,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    pub fn open_ids(&self) -> &HashSet<String> {
        &self.open
    }

    /// True while the set is being driven by an active filter
    pub fn is_filter_driven(&self) -> bool {
        self.filter_driven
    }

    /// Flip `id` open or closed.
    ///
    /// Ignored while a filter is active, and for categories without children
    /// (including ids missing from `tree`).
    ///
    /// # Returns
    ///
    /// Whether the set changed.
    pub fn toggle(&mut self, tree: &CategoryTree, id: &str) -> bool {
        if self.filter_driven {
            tracing::debug!("Ignoring toggle of '{}' while filter is active", id);
            return false;
        }
        if !tree.has_children(id) {
            return false;
        }

        if !self.open.remove(id) {
            self.open.insert(id.to_string());
        }
        true
    }

    /// Re-derive the set from a fresh filter result.
    ///
    /// - Active filter: every passing category with at least one passing
    ///   child is opened, replacing whatever was open before.
    /// - Filter just cleared: everything collapses.
    /// - Filter inactive before and after: manual state is left alone.
    pub fn sync(&mut self, tree: &CategoryTree, visibility: &Visibility) {
        if visibility.is_active() {
            self.open = tree
                .ids()
                .filter(|id| visibility.passes(id) && visibility.has_passing_child(tree, id))
                .map(str::to_string)
                .collect();
            self.filter_driven = true;
        } else if self.filter_driven {
            self.open.clear();
            self.filter_driven = false;
        }
    }

    /// Drop `ids` from the set (used after a cascading delete)
    ///
    /// Returns how many were open.
    pub fn forget<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut forgotten = 0;
        for id in ids {
            let id: &str = id.as_ref();
            if self.open.remove(id) {
                forgotten += 1;
            }
        }
        forgotten
    }

    /// Drop every id that `tree` no longer contains
    pub fn retain_existing(&mut self, tree: &CategoryTree) -> usize {
        let before = self.open.len();
        self.open.retain(|id| tree.contains(id));
        before - self.open.len()
    }

    /// Open every category that has children (manual mode only)
    pub fn expand_all(&mut self, tree: &CategoryTree) -> bool {
        if self.filter_driven {
            return false;
        }
        self.open = tree
            .ids()
            .filter(|id| tree.has_children(id))
            .map(str::to_string)
            .collect();
        true
    }

    /// Close everything (manual mode only)
    pub fn collapse_all(&mut self) -> bool {
        if self.filter_driven {
            return false;
        }
        self.open.clear();
        true
    }
}
