//! Service Layer Error Types
//!
//! Errors returned by `TaxonomyService`. None of them ends the session:
//! validation errors are raised before any request, and backend failures
//! leave the local snapshot as it was (or roll it back).

use crate::backend::BackendError;
use crate::models::ValidationError;
use crate::tree::TreeError;
use thiserror::Error;

/// Taxonomy service operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyServiceError {
    /// Name rejected before reaching the backend
    #[error("Category validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Backend request failed
    #[error("Backend request failed: {0}")]
    BackendFailed(#[from] BackendError),

    /// Fetched snapshot is not a valid forest
    #[error("Invalid tree snapshot: {0}")]
    InvalidSnapshot(#[from] TreeError),

    /// Category missing from the local snapshot
    #[error("Category not found: {id}")]
    NodeNotFound { id: String },

    /// Configuration rejected at service construction
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TaxonomyServiceError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the error was raised locally, before any backend request
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed(_))
    }
}
