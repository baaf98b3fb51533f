//! Category Data Structures
//!
//! `CategoryNode` is the nested shape the backend returns from a tree fetch:
//! every node owns its children directly. The engine never works on this
//! shape after a refresh; it is flattened into the arena in
//! [`crate::tree::CategoryTree`].
//!
//! # Examples
//!
//! ```rust
//! use nursery_core::models::CategoryNode;
//!
//! let apple = CategoryNode::new("apple", "Apple")
//!     .with_child(CategoryNode::new("gala", "Gala"))
//!     .with_child(CategoryNode::new("fuji", "Fuji"));
//! let fruit = CategoryNode::new("fruit", "Fruit Trees").with_child(apple);
//!
//! assert_eq!(fruit.subtree_len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for category names and identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,

    #[error("Category name is {actual} characters long, maximum is {max}")]
    NameTooLong { max: usize, actual: usize },

    #[error("Category id cannot be empty")]
    EmptyId,
}

/// A category as fetched from the backend, children nested in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// Opaque identifier assigned by the backend
    pub id: String,

    /// Display label
    pub name: String,

    /// Owning category, `None` for a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Direct children in backend order (display order is computed later)
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Create a childless root category
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Attach `child` and stamp its `parent_id` with this node's id
    pub fn with_child(mut self, mut child: CategoryNode) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CategoryNode::subtree_len)
            .sum::<usize>()
    }
}

/// Flat adjacency-list form of a category (one row per node)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl CategoryRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
        }
    }
}

/// Normalize a user-entered category name and check it.
///
/// # Arguments
///
/// * `name` - Raw text from the edit form
/// * `trim` - Strip surrounding whitespace before checking
/// * `max_len` - Maximum length in characters
///
/// # Returns
///
/// The name to submit to the backend, or the reason it was rejected.
///
/// # Examples
///
/// ```rust
/// use nursery_core::models::{normalize_name, ValidationError};
///
/// assert_eq!(normalize_name("  Gala ", true, 120).unwrap(), "Gala");
/// assert_eq!(normalize_name("   ", true, 120), Err(ValidationError::EmptyName));
/// ```
pub fn normalize_name(name: &str, trim: bool, max_len: usize) -> Result<String, ValidationError> {
    let candidate = if trim { name.trim() } else { name };

    if candidate.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let actual = candidate.chars().count();
    if actual > max_len {
        return Err(ValidationError::NameTooLong {
            max: max_len,
            actual,
        });
    }

    Ok(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_child_sets_parent_id() {
        let root = CategoryNode::new("fruit", "Fruit Trees")
            .with_child(CategoryNode::new("apple", "Apple"));

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].parent_id.as_deref(), Some("fruit"));
        assert_eq!(root.parent_id, None);
    }

    #[test]
    fn test_deserialize_nested_camel_case() {
        let json = r#"[
            {"id": "fruit", "name": "Fruit Trees", "children": [
                {"id": "apple", "name": "Apple", "parentId": "fruit"}
            ]}
        ]"#;

        let forest: Vec<CategoryNode> = serde_json::from_str(json).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children[0].parent_id.as_deref(), Some("fruit"));
        assert!(forest[0].children[0].children.is_empty());
    }

    #[test]
    fn test_normalize_name_rejects_empty() {
        assert_eq!(normalize_name("", true, 10), Err(ValidationError::EmptyName));
        assert_eq!(normalize_name("  \t", false, 10), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_normalize_name_without_trim_keeps_whitespace() {
        assert_eq!(normalize_name(" Gala ", false, 10).unwrap(), " Gala ");
    }

    #[test]
    fn test_normalize_name_counts_characters() {
        // Six characters, seven bytes
        assert_eq!(normalize_name("Érable", true, 6).unwrap(), "Érable");
        assert_eq!(
            normalize_name("Érables", true, 6),
            Err(ValidationError::NameTooLong { max: 6, actual: 7 })
        );
    }
}
