//! Optimistic rename
//!
//! A rename shows the new label before the backend answers. The previous
//! label is captured up front so a failed request can be undone by replaying
//! the inverse edit instead of tracking ad hoc "dirty" flags.
//!
//! # Example
//!
//! ```rust
//! use nursery_core::models::CategoryNode;
//! use nursery_core::operations::PendingRename;
//! use nursery_core::tree::CategoryTree;
//!
//! let mut tree = CategoryTree::from_forest(vec![CategoryNode::new("gala", "Gala")]).unwrap();
//!
//! let pending = PendingRename::prepare(&tree, "gala", "Gala Apple").unwrap();
//! pending.apply(&mut tree);
//! assert_eq!(tree.get("gala").unwrap().name(), "Gala Apple");
//!
//! // Backend said no
//! pending.compensate(&mut tree);
//! assert_eq!(tree.get("gala").unwrap().name(), "Gala");
//! ```

use crate::tree::CategoryTree;

/// A rename that has been shown locally but not yet confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRename {
    id: String,
    previous: String,
    next: String,
}

impl PendingRename {
    pub fn new(id: impl Into<String>, previous: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            previous: previous.into(),
            next: next.into(),
        }
    }

    /// Capture the current label of `id`; `None` if the tree lacks it
    pub fn prepare(tree: &CategoryTree, id: &str, next: impl Into<String>) -> Option<Self> {
        let node = tree.get(id)?;
        Some(Self::new(id, node.name(), next))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn next(&self) -> &str {
        &self.next
    }

    /// Show the new label. Returns false if the category vanished.
    pub fn apply(&self, tree: &mut CategoryTree) -> bool {
        tree.rename(&self.id, self.next.clone()).is_some()
    }

    /// Restore the label captured by `prepare`
    pub fn compensate(&self, tree: &mut CategoryTree) -> bool {
        tree.rename(&self.id, self.previous.clone()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryNode;

    fn tree() -> CategoryTree {
        CategoryTree::from_forest(vec![
            CategoryNode::new("apple", "Apple").with_child(CategoryNode::new("gala", "Gala"))
        ])
        .unwrap()
    }

    #[test]
    fn test_prepare_captures_previous_name() {
        let pending = PendingRename::prepare(&tree(), "gala", "Gala Apple").unwrap();

        assert_eq!(pending.id(), "gala");
        assert_eq!(pending.previous(), "Gala");
        assert_eq!(pending.next(), "Gala Apple");
    }

    #[test]
    fn test_prepare_unknown_id() {
        assert!(PendingRename::prepare(&tree(), "missing", "x").is_none());
    }

    #[test]
    fn test_apply_then_compensate_restores() {
        let mut tree = tree();
        let pending = PendingRename::prepare(&tree, "gala", "Gala Apple").unwrap();

        assert!(pending.apply(&mut tree));
        assert_eq!(tree.get("gala").map(|n| n.name()), Some("Gala Apple"));

        assert!(pending.compensate(&mut tree));
        assert_eq!(tree.get("gala").map(|n| n.name()), Some("Gala"));
    }

    #[test]
    fn test_compensate_after_removal_reports_false() {
        let mut tree = tree();
        let pending = PendingRename::prepare(&tree, "gala", "Gala Apple").unwrap();
        tree.remove_subtree("gala");

        assert!(!pending.compensate(&mut tree));
    }
}
