//! Local Tree Operations
//!
//! Edits applied to the local snapshot ahead of, or in place of, a refetch.
//!
//! - `PendingRename` - Optimistic rename with an explicit compensating action

mod rename;

pub use rename::PendingRename;
