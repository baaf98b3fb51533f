//! Row Flattener
//!
//! Pre-order walk over the filtered forest. Roots and every sibling group are
//! sorted case-insensitively by name at render time; a category's children
//! are only walked when it is open. Depth is the real tree depth, which is
//! always consistent because a category can only be reached through
//! ancestors that passed the filter themselves.

use crate::models::VisibleRow;
use crate::tree::{CategoryTree, TreeNode};
use crate::view::{ExpansionState, Visibility};

/// Produce the ordered table rows for one render.
pub fn flatten_rows(
    tree: &CategoryTree,
    visibility: &Visibility,
    expansion: &ExpansionState,
) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    let roots = sorted_by_name(tree.roots().filter(|root| visibility.passes(root.id())));

    for root in roots {
        visit(tree, visibility, expansion, root, 0, &mut rows);
    }
    rows
}

fn visit(
    tree: &CategoryTree,
    visibility: &Visibility,
    expansion: &ExpansionState,
    node: &TreeNode,
    depth: usize,
    rows: &mut Vec<VisibleRow>,
) {
    let children = sorted_by_name(visibility.passing_children(tree, node.id()));

    rows.push(VisibleRow {
        id: node.id().to_string(),
        name: node.name().to_string(),
        depth,
        has_children: !children.is_empty(),
    });

    if !expansion.is_open(node.id()) {
        return;
    }
    for child in children {
        visit(tree, visibility, expansion, child, depth + 1, rows);
    }
}

/// Case-insensitive order by name; ties fall back to id so output is stable
pub fn sorted_by_name<'a>(nodes: impl Iterator<Item = &'a TreeNode>) -> Vec<&'a TreeNode> {
    let mut nodes: Vec<&TreeNode> = nodes.collect();
    nodes.sort_by_cached_key(|node| (node.name().to_lowercase(), node.id().to_string()));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryNode, FilterState};

    fn names(rows: &[VisibleRow]) -> Vec<(&str, usize)> {
        rows.iter().map(|row| (row.name.as_str(), row.depth)).collect()
    }

    fn tree() -> CategoryTree {
        let apple = CategoryNode::new("apple", "apple")
            .with_child(CategoryNode::new("gala", "Gala"))
            .with_child(CategoryNode::new("braeburn", "Braeburn"));
        let fruit = CategoryNode::new("fruit", "Fruit Trees")
            .with_child(CategoryNode::new("pear", "Pear"))
            .with_child(apple);
        CategoryTree::from_forest(vec![
            CategoryNode::new("roses", "Roses"),
            fruit,
            CategoryNode::new("conifers", "conifers"),
        ])
        .unwrap()
    }

    #[test]
    fn test_collapsed_tree_shows_sorted_roots() {
        let tree = tree();
        let rows = flatten_rows(
            &tree,
            &Visibility::compute(&tree, &FilterState::default()),
            &ExpansionState::new(),
        );

        assert_eq!(names(&rows), vec![("conifers", 0), ("Fruit Trees", 0), ("Roses", 0)]);
        assert!(rows[1].has_children);
        assert!(!rows[0].has_children);
    }

    #[test]
    fn test_open_nodes_emit_sorted_children_depth_first() {
        let tree = tree();
        let mut expansion = ExpansionState::new();
        expansion.toggle(&tree, "fruit");
        expansion.toggle(&tree, "apple");

        let rows = flatten_rows(
            &tree,
            &Visibility::compute(&tree, &FilterState::default()),
            &expansion,
        );

        assert_eq!(
            names(&rows),
            vec![
                ("conifers", 0),
                ("Fruit Trees", 0),
                ("apple", 1),
                ("Braeburn", 2),
                ("Gala", 2),
                ("Pear", 1),
                ("Roses", 0),
            ]
        );
    }

    #[test]
    fn test_open_child_under_closed_parent_stays_hidden() {
        let tree = tree();
        let mut expansion = ExpansionState::new();
        expansion.toggle(&tree, "apple");

        let rows = flatten_rows(
            &tree,
            &Visibility::compute(&tree, &FilterState::default()),
            &expansion,
        );

        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_sorted_by_name_ties_break_on_id() {
        let tree = CategoryTree::from_forest(vec![
            CategoryNode::new("b", "Same"),
            CategoryNode::new("a", "same"),
        ])
        .unwrap();

        let ids: Vec<_> = sorted_by_name(tree.roots()).iter().map(|n| n.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
