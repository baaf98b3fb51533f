//! Adjacency-list assembly
//!
//! Backends that store categories as flat `(id, name, parent_id)` rows build
//! the nested fetch response here: one pass to index rows by parent, then a
//! recursive walk from the roots. Rows never reached from a root sit on a
//! parent loop and are reported as a cycle.

use crate::models::{CategoryNode, CategoryRecord, ValidationError};
use crate::tree::{TreeError, MAX_TREE_DEPTH};
use std::collections::{HashMap, HashSet};

/// Assemble a nested forest from flat records.
///
/// Roots and siblings keep the order in which they appear in `records`.
///
/// # Errors
///
/// - `TreeError::DuplicateNode` if two records share an id
/// - `TreeError::UnknownParent` if a record references a missing parent
/// - `TreeError::CycleDetected` if parent links loop
/// - `TreeError::DepthExceeded` past `MAX_TREE_DEPTH` levels
///
/// # Examples
///
/// ```rust
/// use nursery_core::models::CategoryRecord;
/// use nursery_core::tree::build_forest;
///
/// let records = vec![
///     CategoryRecord::new("apple", "Apple", Some("fruit".to_string())),
///     CategoryRecord::new("fruit", "Fruit Trees", None),
/// ];
/// let forest = build_forest(&records).unwrap();
///
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].children[0].name, "Apple");
/// ```
pub fn build_forest(records: &[CategoryRecord]) -> Result<Vec<CategoryNode>, TreeError> {
    let mut by_id: HashMap<&str, &CategoryRecord> = HashMap::with_capacity(records.len());
    for record in records {
        if record.id.is_empty() {
            return Err(ValidationError::EmptyId.into());
        }
        if by_id.insert(record.id.as_str(), record).is_some() {
            return Err(TreeError::DuplicateNode {
                id: record.id.clone(),
            });
        }
    }

    let mut roots = Vec::new();
    let mut adjacency: HashMap<&str, Vec<&CategoryRecord>> = HashMap::new();
    for record in records {
        match record.parent_id.as_deref() {
            None => roots.push(record),
            Some(parent_id) if by_id.contains_key(parent_id) => {
                adjacency.entry(parent_id).or_default().push(record);
            }
            Some(parent_id) => {
                return Err(TreeError::UnknownParent {
                    id: record.id.clone(),
                    parent_id: parent_id.to_string(),
                });
            }
        }
    }

    let mut reached = HashSet::with_capacity(records.len());
    let forest: Vec<CategoryNode> = roots
        .into_iter()
        .map(|root| build_node(root, 0, &adjacency, &mut reached))
        .collect::<Result<_, _>>()?;

    if reached.len() < records.len() {
        let stranded = records
            .iter()
            .find(|record| !reached.contains(record.id.as_str()));
        if let Some(stranded) = stranded {
            return Err(TreeError::CycleDetected {
                id: stranded.id.clone(),
            });
        }
    }

    Ok(forest)
}

fn build_node<'a>(
    record: &'a CategoryRecord,
    depth: usize,
    adjacency: &HashMap<&str, Vec<&'a CategoryRecord>>,
    reached: &mut HashSet<&'a str>,
) -> Result<CategoryNode, TreeError> {
    if depth >= MAX_TREE_DEPTH {
        return Err(TreeError::DepthExceeded {
            id: record.id.clone(),
            max: MAX_TREE_DEPTH,
        });
    }
    reached.insert(record.id.as_str());

    let children = match adjacency.get(record.id.as_str()) {
        Some(children) => children
            .iter()
            .copied()
            .map(|child| build_node(child, depth + 1, adjacency, reached))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(CategoryNode {
        id: record.id.clone(),
        name: record.name.clone(),
        parent_id: record.parent_id.clone(),
        children,
    })
}
