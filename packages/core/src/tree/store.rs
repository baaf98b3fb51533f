//! Tree Store
//!
//! Holds the most recently fetched taxonomy. The only write path from the
//! backend is a whole-forest replacement; there is no merge of partial
//! snapshots. A snapshot that fails validation is discarded and the previous
//! tree stays in place.

use crate::models::CategoryNode;
use crate::tree::{CategoryTree, TreeError};
use chrono::{DateTime, Utc};

/// Single source of truth for the fetched taxonomy
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    tree: CategoryTree,
    revision: u64,
    refreshed_at: Option<DateTime<Utc>>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    /// Local edits (optimistic rename, post-delete prune) go through here
    pub(crate) fn tree_mut(&mut self) -> &mut CategoryTree {
        &mut self.tree
    }

    /// Number of successful replacements so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Swap in a freshly fetched forest.
    ///
    /// # Returns
    ///
    /// The new revision number.
    ///
    /// # Errors
    ///
    /// Any `TreeError` from building the arena. The current tree is left
    /// untouched in that case.
    pub fn replace(&mut self, forest: Vec<CategoryNode>) -> Result<u64, TreeError> {
        let tree = CategoryTree::from_forest(forest)?;

        self.tree = tree;
        self.revision += 1;
        self.refreshed_at = Some(Utc::now());

        tracing::debug!(
            "Tree store replaced with revision {} ({} categories)",
            self.revision,
            self.tree.len()
        );
        Ok(self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let store = TreeStore::new();
        assert!(store.tree().is_empty());
        assert_eq!(store.revision(), 0);
        assert!(store.refreshed_at().is_none());
    }

    #[test]
    fn test_replace_swaps_whole_forest() {
        let mut store = TreeStore::new();
        store
            .replace(vec![CategoryNode::new("a", "A"), CategoryNode::new("b", "B")])
            .unwrap();

        let revision = store.replace(vec![CategoryNode::new("c", "C")]).unwrap();

        assert_eq!(revision, 2);
        assert_eq!(store.tree().len(), 1);
        assert!(store.tree().contains("c"));
        assert!(!store.tree().contains("a"));
        assert!(store.refreshed_at().is_some());
    }

    #[test]
    fn test_invalid_snapshot_keeps_previous_tree() {
        let mut store = TreeStore::new();
        store.replace(vec![CategoryNode::new("a", "A")]).unwrap();

        let result = store.replace(vec![CategoryNode::new("x", "X"), CategoryNode::new("x", "X")]);

        assert!(result.is_err());
        assert_eq!(store.revision(), 1);
        assert!(store.tree().contains("a"));
    }
}
