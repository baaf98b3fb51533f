//! Taxonomy View Pipeline
//!
//! Turns a tree snapshot plus the session's UI state into table rows:
//!
//! ```text
//! CategoryTree ──► Visibility::compute ──► ExpansionState::sync ──► flatten_rows ──► Vec<VisibleRow>
//!                        ▲                                                ▲
//!                   FilterState                                  ExpansionState
//! ```
//!
//! Every stage is a synchronous function of its inputs, so the pipeline can
//! be re-run on each change and tested without any rendering environment.
//! `ViewState` bundles the two pieces of UI state (filter text and open set)
//! that the stages thread through.

mod expansion;
mod flatten;
mod visibility;

pub use expansion::ExpansionState;
pub use flatten::{flatten_rows, sorted_by_name};
pub use visibility::Visibility;

use crate::models::{FilterState, VisibleRow};
use crate::tree::CategoryTree;

/// Rows for `tree` under `filter` and `expansion`, without touching either.
///
/// The caller is responsible for having synced `expansion` with `filter`
/// (see [`ViewState::set_filter`]).
pub fn visible_rows(
    tree: &CategoryTree,
    filter: &FilterState,
    expansion: &ExpansionState,
) -> Vec<VisibleRow> {
    let visibility = Visibility::compute(tree, filter);
    flatten_rows(tree, &visibility, expansion)
}

/// UI state of one taxonomy session: filter text and open categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    filter: FilterState,
    expansion: ExpansionState,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Store new filter text and re-derive the open set from it
    pub fn set_filter(&mut self, tree: &CategoryTree, filter: FilterState) {
        self.filter = filter;
        self.resync(tree);
    }

    /// Bring the open set in line with a replaced tree snapshot.
    ///
    /// Ids missing from `tree` are dropped first; an active filter is then
    /// re-run against the new snapshot.
    pub fn refresh(&mut self, tree: &CategoryTree) -> usize {
        let stale = self.expansion.retain_existing(tree);
        if stale > 0 {
            tracing::debug!("Dropped {} stale ids from expansion state", stale);
        }
        self.resync(tree);
        stale
    }

    /// Re-run the current filter against `tree` after a local edit.
    ///
    /// A label change can move categories in or out of the filter result, so
    /// a filter-driven open set must be re-derived from the edited tree.
    pub fn resync(&mut self, tree: &CategoryTree) {
        let visibility = Visibility::compute(tree, &self.filter);
        self.expansion.sync(tree, &visibility);
    }

    pub fn toggle(&mut self, tree: &CategoryTree, id: &str) -> bool {
        self.expansion.toggle(tree, id)
    }

    pub fn expand_all(&mut self, tree: &CategoryTree) -> bool {
        self.expansion.expand_all(tree)
    }

    pub fn collapse_all(&mut self) -> bool {
        self.expansion.collapse_all()
    }

    /// Remove deleted categories from the open set
    pub fn forget<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.expansion.forget(ids)
    }

    pub fn rows(&self, tree: &CategoryTree) -> Vec<VisibleRow> {
        visible_rows(tree, &self.filter, &self.expansion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryNode, FilterLevel};

    fn orchard() -> CategoryTree {
        let apple = CategoryNode::new("apple", "Apple")
            .with_child(CategoryNode::new("gala", "Gala"))
            .with_child(CategoryNode::new("fuji", "Fuji"));
        let fruit = CategoryNode::new("fruit", "Fruit Trees").with_child(apple);
        CategoryTree::from_forest(vec![fruit]).unwrap()
    }

    #[test]
    fn test_set_filter_drives_rows() {
        let tree = orchard();
        let mut view = ViewState::new();

        view.set_filter(&tree, FilterState::only(FilterLevel::Species, "fuji"));
        let rows = view.rows(&tree);

        let ids: Vec<_> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["fruit", "apple", "fuji"]);
    }

    #[test]
    fn test_refresh_prunes_stale_ids_and_resyncs() {
        let mut tree = orchard();
        let mut view = ViewState::new();
        view.toggle(&tree, "fruit");
        view.toggle(&tree, "apple");

        tree.remove_subtree("apple");
        let stale = view.refresh(&tree);

        assert_eq!(stale, 1);
        assert!(view.expansion().is_open("fruit"));
        assert!(!view.expansion().is_open("apple"));
    }
}
