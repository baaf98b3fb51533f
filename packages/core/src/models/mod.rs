//! Data Models
//!
//! This module contains the data structures shared by every layer of the
//! taxonomy engine:
//!
//! - `CategoryNode` - Nested category as exchanged with the backend
//! - `CategoryRecord` - Flat adjacency-list form of a category
//! - `FilterState` - Per-depth search text typed by the user
//! - `VisibleRow` - Projection consumed by the presentation layer

mod category;
mod filter;
mod row;

pub use category::{normalize_name, CategoryNode, CategoryRecord, ValidationError};
pub use filter::{FilterLevel, FilterState, FILTER_LEVEL_COUNT};
pub use row::VisibleRow;
