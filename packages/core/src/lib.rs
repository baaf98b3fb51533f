//! Nursery Taxonomy Core
//!
//! This crate provides the category tree engine behind the nursery's
//! product taxonomy screen: Category, Sub-category and Species levels,
//! fetched from a remote data service and browsed as an expandable table.
//!
//! # Architecture
//!
//! - **Snapshot, not sync**: the whole forest is refetched after every
//!   create or delete and replaces the local tree wholesale
//! - **Pure view pipeline**: filtering, expansion and flattening are
//!   synchronous functions of (tree, filter, open set)
//! - **Optimistic rename**: labels change immediately and are rolled back
//!   if the backend refuses
//! - **Pluggable backend**: the engine talks to the data service only
//!   through the `TaxonomyBackend` trait
//!
//! # Modules
//!
//! - [`models`] - Data structures (CategoryNode, FilterState, VisibleRow)
//! - [`tree`] - Arena tree, adjacency-list builder and snapshot store
//! - [`view`] - Visibility filter, expansion state and row flattening
//! - [`backend`] - Backend trait and the in-memory implementation
//! - [`operations`] - Local edits with compensating actions
//! - [`services`] - TaxonomyService, events and service errors
//! - [`config`] - Engine configuration

pub mod backend;
pub mod config;
pub mod models;
pub mod operations;
pub mod services;
pub mod tree;
pub mod view;

// Re-export commonly used types
pub use backend::{BackendError, BackendOperation, InMemoryBackend, TaxonomyBackend};
pub use config::TaxonomyConfig;
pub use models::*;
pub use services::*;
pub use tree::{CategoryTree, TreeError, TreeStore};
pub use view::{visible_rows, ViewState};
