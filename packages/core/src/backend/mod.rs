//! Taxonomy Backend Contract
//!
//! The remote data service is reached through the `TaxonomyBackend` trait so
//! the engine never depends on a transport. Every call is a full request:
//! the engine does not cache, batch or retry.
//!
//! - `fetch_tree` returns the whole forest at arbitrary depth
//! - `create_node` attaches a new category under `parent_id` (or as a root)
//! - `rename_node` changes one label in place
//! - `delete_node` removes a category and its whole subtree, all or nothing

mod in_memory;

pub use in_memory::InMemoryBackend;

use crate::models::CategoryNode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors reported by a backend request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Transport or service failure
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The request referenced a category the backend does not hold
    #[error("Category not found: {id}")]
    NodeNotFound { id: String },

    /// The backend refused the request
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Failed to acquire backend lock")]
    LockPoisoned,
}

impl BackendError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

/// The four backend requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackendOperation {
    Fetch,
    Create,
    Rename,
    Delete,
}

impl BackendOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendOperation::Fetch => "fetch",
            BackendOperation::Create => "create",
            BackendOperation::Rename => "rename",
            BackendOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote store of the category tree
#[async_trait]
pub trait TaxonomyBackend: Send + Sync {
    /// Full snapshot of the forest
    async fn fetch_tree(&self) -> Result<Vec<CategoryNode>, BackendError>;

    /// Create a category under `parent_id`, or a new root when `None`
    async fn create_node(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<CategoryNode, BackendError>;

    async fn rename_node(&self, id: &str, name: &str) -> Result<CategoryNode, BackendError>;

    /// Delete `id` and every descendant in one request
    async fn delete_node(&self, id: &str) -> Result<(), BackendError>;
}
