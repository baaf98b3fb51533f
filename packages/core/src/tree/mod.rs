//! Category Tree
//!
//! - `CategoryTree` - Arena of categories keyed by id
//! - `TreeStore` - Holds the latest fetched arena and replaces it wholesale
//! - `build_forest` - Nested forest from flat adjacency-list records

mod adjacency;
mod category_tree;
mod error;
mod store;

pub use adjacency::build_forest;
pub use category_tree::{CategoryTree, TreeNode};
pub use error::TreeError;
pub use store::TreeStore;

/// Deepest nesting accepted from a snapshot (root = level 0).
///
/// Every walk over the arena recurses once per level, so this also bounds
/// the stack used by filtering and flattening.
pub const MAX_TREE_DEPTH: usize = 256;
