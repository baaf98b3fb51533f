//! Visibility Filter
//!
//! Computes which categories survive the per-depth filter. Matching is
//! depth-typed: the text in a level's box is only compared against names at
//! that depth, and depths without a box never match on their own.
//!
//! A category passes when it matches directly or when any descendant passes.
//! Categories that pass without matching stay in the view only as the path
//! down to a match; everything else is pruned along with its subtree. A
//! matching category does not reveal its children by itself.

use crate::models::{FilterState, FILTER_LEVEL_COUNT};
use crate::tree::{CategoryTree, TreeNode};
use std::collections::HashSet;

/// Result of running the filter over one tree snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    active: bool,
    passing: HashSet<String>,
    matched: HashSet<String>,
}

impl Visibility {
    /// Run `filter` over every category of `tree`.
    ///
    /// With an inactive filter nothing is computed and every category passes.
    pub fn compute(tree: &CategoryTree, filter: &FilterState) -> Self {
        if !filter.is_active() {
            return Self::default();
        }

        let needles: Vec<Option<String>> = (0..FILTER_LEVEL_COUNT)
            .map(|depth| filter.needle_for_depth(depth))
            .collect();

        let mut visibility = Self {
            active: true,
            ..Self::default()
        };
        for root in tree.roots() {
            visibility.mark(tree, root, 0, &needles);
        }

        tracing::debug!(
            "Filter matched {} categories, {} pass",
            visibility.matched.len(),
            visibility.passing.len()
        );
        visibility
    }

    /// Post-order walk; returns whether `node` passes
    fn mark(
        &mut self,
        tree: &CategoryTree,
        node: &TreeNode,
        depth: usize,
        needles: &[Option<String>],
    ) -> bool {
        let direct = needles
            .get(depth)
            .and_then(Option::as_deref)
            .is_some_and(|needle| node.name().to_lowercase().contains(needle));

        // Every child must be visited, so no short-circuiting here
        let mut descendant_passes = false;
        for child in tree.children(node.id()) {
            if self.mark(tree, child, depth + 1, needles) {
                descendant_passes = true;
            }
        }

        if direct {
            self.matched.insert(node.id().to_string());
        }
        let passes = direct || descendant_passes;
        if passes {
            self.passing.insert(node.id().to_string());
        }
        passes
    }

    /// Whether any filter text was set when this was computed
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn passes(&self, id: &str) -> bool {
        !self.active || self.passing.contains(id)
    }

    /// Matched at its own depth (always false for an inactive filter)
    pub fn is_direct_match(&self, id: &str) -> bool {
        self.matched.contains(id)
    }

    /// Children of `id` that survive the filter, in backend order
    pub fn passing_children<'a>(
        &'a self,
        tree: &'a CategoryTree,
        id: &str,
    ) -> impl Iterator<Item = &'a TreeNode> + 'a {
        tree.children(id).filter(move |child| self.passes(child.id()))
    }

    pub fn has_passing_child(&self, tree: &CategoryTree, id: &str) -> bool {
        self.passing_children(tree, id).next().is_some()
    }

    pub fn passing_ids(&self) -> impl Iterator<Item = &str> {
        self.passing.iter().map(String::as_str)
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
        let pear =
            CategoryNode::new("pear", "Pear").with_child(CategoryNode::new("williams", "Williams"));
        let fruit = CategoryNode::new("fruit", "Fruit Trees")
            .with_child(apple)
            .with_child(pear);
        CategoryTree::from_forest(vec![fruit]).unwrap()
    }

    #[test]
    fn test_inactive_filter_passes_everything() {
        let tree = orchard();
        let visibility = Visibility::compute(&tree, &FilterState::default());

        assert!(!visibility.is_active());
        for id in tree.ids() {
            assert!(visibility.passes(id));
            assert!(!visibility.is_direct_match(id));
        }
    }

    #[test]
    fn test_root_match_does_not_reveal_children() {
        let tree = orchard();
        let visibility = Visibility::compute(&tree, &FilterState::only(FilterLevel::Category, "fruit"));

        assert!(visibility.passes("fruit"));
        for id in ["apple", "pear", "gala", "fuji", "williams"] {
            assert!(!visibility.passes(id), "{id} should be pruned");
        }
        assert!(!visibility.has_passing_child(&tree, "fruit"));
    }

    #[test]
    fn test_leaf_match_keeps_ancestor_path() {
        let tree = orchard();
        let visibility = Visibility::compute(&tree, &FilterState::only(FilterLevel::Species, "gala"));

        let mut passing: Vec<_> = visibility.passing_ids().collect();
        passing.sort();
        assert_eq!(passing, vec!["apple", "fruit", "gala"]);
        assert!(visibility.is_direct_match("gala"));
        assert!(!visibility.is_direct_match("apple"));
    }

    #[test]
    fn test_term_is_only_compared_at_its_depth() {
        let tree = orchard();
        // "apple" typed into the species box must not match the sub-category "Apple"
        let visibility = Visibility::compute(&tree, &FilterState::only(FilterLevel::Species, "apple"));

        assert!(visibility.is_active());
        assert_eq!(visibility.passing_ids().count(), 0);
    }

    #[test]
    fn test_multiple_levels_combine_by_union() {
        let tree = orchard();
        let filter = FilterState::new("", "pear", "fuji");
        let visibility = Visibility::compute(&tree, &filter);

        let mut passing: Vec<_> = visibility.passing_ids().collect();
        passing.sort();
        assert_eq!(passing, vec!["apple", "fruit", "fuji", "pear"]);
        assert!(!visibility.passes("williams"));
    }
}
