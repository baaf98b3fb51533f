//! Category Arena
//!
//! The fetched forest is stored as a flat map of nodes keyed by id, each
//! holding its parent id and the ids of its children. Nothing in the arena
//! owns another node, so a cascading delete is a plain "collect the subtree,
//! remove every id" pass and the single-parent rule can be checked while the
//! map is filled.
//!
//! Children keep backend order here. Display order (case-insensitive by name)
//! is applied by the row flattener at render time.

use crate::models::{CategoryNode, ValidationError};
use crate::tree::{TreeError, MAX_TREE_DEPTH};
use std::collections::HashMap;

/// One category inside the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    id: String,
    name: String,
    parent_id: Option<String>,
    children: Vec<String>,
}

impl TreeNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn child_ids(&self) -> &[String] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Forest of categories addressed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    nodes: HashMap<String, TreeNode>,
    roots: Vec<String>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the arena from a nested forest as returned by the backend.
    ///
    /// # Errors
    ///
    /// - `TreeError::DuplicateNode` if an id occurs twice
    /// - `TreeError::ParentMismatch` if a node's declared `parent_id`
    ///   disagrees with where it is nested
    /// - `TreeError::InvalidNode` for an empty id
    /// - `TreeError::DepthExceeded` past `MAX_TREE_DEPTH` levels
    pub fn from_forest(forest: Vec<CategoryNode>) -> Result<Self, TreeError> {
        let mut tree = Self::new();
        for root in forest {
            tree.roots.push(root.id.clone());
            tree.insert_subtree(root, None, 0)?;
        }
        Ok(tree)
    }

    fn insert_subtree(
        &mut self,
        node: CategoryNode,
        parent: Option<&str>,
        depth: usize,
    ) -> Result<(), TreeError> {
        let CategoryNode {
            id,
            name,
            parent_id,
            children,
        } = node;

        if id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if depth >= MAX_TREE_DEPTH {
            return Err(TreeError::DepthExceeded {
                id,
                max: MAX_TREE_DEPTH,
            });
        }

        // A missing parent_id on a nested child means "inherit the container"
        if let Some(declared) = parent_id {
            if parent != Some(declared.as_str()) {
                return Err(TreeError::ParentMismatch {
                    id,
                    declared,
                    actual: parent.map(str::to_string),
                });
            }
        }

        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode { id });
        }

        let child_ids = children.iter().map(|child| child.id.clone()).collect();
        self.nodes.insert(
            id.clone(),
            TreeNode {
                id: id.clone(),
                name,
                parent_id: parent.map(str::to_string),
                children: child_ids,
            },
        );

        for child in children {
            self.insert_subtree(child, Some(&id), depth + 1)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Root categories in backend order
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode> {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Direct children of `id` in backend order (empty for unknown ids)
    pub fn children<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a TreeNode> + 'a {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(move |node| {
                node.children
                    .iter()
                    .filter_map(move |child| self.nodes.get(child))
            })
    }

    pub fn has_children(&self, id: &str) -> bool {
        self.nodes.get(id).is_some_and(TreeNode::has_children)
    }

    /// Positional depth of `id` (root = 0)
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.nodes.get(id)?;
        Some(self.ancestor_ids(id).len())
    }

    /// Ancestors of `id`, nearest parent first
    pub fn ancestor_ids(&self, id: &str) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut current = self.nodes.get(id).and_then(|node| node.parent_id.as_deref());
        while let Some(parent_id) = current {
            ancestors.push(parent_id.to_string());
            current = self.nodes.get(parent_id).and_then(|node| node.parent_id.as_deref());
        }
        ancestors
    }

    /// `id` and every descendant, pre-order. Empty when `id` is unknown.
    pub fn subtree_ids(&self, id: &str) -> Vec<String> {
        let mut collected = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            collected.push(node.id.clone());
            stack.extend(node.children.iter().rev().map(String::as_str));
        }

        collected
    }

    /// Replace the label of `id`, returning the previous one
    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Option<String> {
        let node = self.nodes.get_mut(id)?;
        Some(std::mem::replace(&mut node.name, name.into()))
    }

    /// Detach `id` from its parent and drop it together with its subtree.
    ///
    /// Returns the removed ids (empty when `id` is unknown).
    pub fn remove_subtree(&mut self, id: &str) -> Vec<String> {
        let removed = self.subtree_ids(id);
        if removed.is_empty() {
            return removed;
        }

        let parent_id = self.nodes.get(id).and_then(|node| node.parent_id.clone());
        match parent_id.and_then(|parent_id| self.nodes.get_mut(&parent_id)) {
            Some(parent) => parent.children.retain(|child| child != id),
            None => self.roots.retain(|root| root != id),
        }

        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }
        removed
    }

    /// Nested copy of the arena, children in backend order
    pub fn to_forest(&self) -> Vec<CategoryNode> {
        self.roots
            .iter()
            .filter_map(|id| self.build_nested(id))
            .collect()
    }

    fn build_nested(&self, id: &str) -> Option<CategoryNode> {
        let node = self.nodes.get(id)?;
        Some(CategoryNode {
            id: node.id.clone(),
            name: node.name.clone(),
            parent_id: node.parent_id.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.build_nested(child))
                .collect(),
        })
    }
}
