//! Tree Construction Error Types

use crate::models::ValidationError;
use thiserror::Error;

/// Errors raised while assembling or editing the category arena
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Same id appears twice in one snapshot
    #[error("Duplicate category id in snapshot: {id}")]
    DuplicateNode { id: String },

    /// A nested child declares a parent other than the node containing it
    #[error("Category '{id}' declares parent {declared:?} but is nested under {actual:?}")]
    ParentMismatch {
        id: String,
        declared: String,
        actual: Option<String>,
    },

    /// Flat record points at a parent that is not in the snapshot
    #[error("Category '{id}' references unknown parent '{parent_id}'")]
    UnknownParent { id: String, parent_id: String },

    /// Flat records form a loop instead of a forest
    #[error("Circular parent chain detected at category '{id}'")]
    CycleDetected { id: String },

    /// Nesting goes deeper than `MAX_TREE_DEPTH` levels
    #[error("Category '{id}' is nested deeper than {max} levels")]
    DepthExceeded { id: String, max: usize },

    #[error("Invalid category: {0}")]
    InvalidNode(#[from] ValidationError),
}
