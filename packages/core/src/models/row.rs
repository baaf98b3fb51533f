use serde::{Deserialize, Serialize};

/// One line of the taxonomy table.
///
/// Never stored; recomputed from the tree, the filter and the expansion set
/// on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleRow {
    pub id: String,
    pub name: String,
    /// Depth in the full tree (root = 0), used for indentation
    pub depth: usize,
    /// Whether the node has children in the current (filtered) view
    pub has_children: bool,
}
