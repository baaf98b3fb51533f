//! In-Memory Backend
//!
//! `TaxonomyBackend` over a flat record list held behind a mutex. Fetches
//! assemble the forest with `build_forest`; deletes cascade over the records
//! in one locked pass, so a delete is all or nothing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::{sleep, Duration};
use uuid::Uuid;

use crate::backend::{BackendError, BackendOperation, TaxonomyBackend};
use crate::models::{CategoryNode, CategoryRecord};
use crate::tree::build_forest;

/// Backend keeping flat category records in memory.
///
/// Used by tests and the dev tool. Optional latency mimics a network round
/// trip, and `fail_next` makes the next request of one kind fail.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    records: Arc<Mutex<Vec<CategoryRecord>>>,
    failures: Arc<Mutex<HashSet<BackendOperation>>>,
    latency: Option<Duration>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CategoryRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    /// Seed from a nested forest (e.g. a JSON snapshot)
    pub fn from_forest(forest: &[CategoryNode]) -> Self {
        let mut records = Vec::new();
        let mut stack: Vec<(&CategoryNode, Option<&str>)> =
            forest.iter().rev().map(|root| (root, None)).collect();

        while let Some((node, parent_id)) = stack.pop() {
            records.push(CategoryRecord::new(
                node.id.clone(),
                node.name.clone(),
                parent_id.map(str::to_string),
            ));
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|child| (child, Some(node.id.as_str()))),
            );
        }

        Self::with_records(records)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next request of kind `operation` fail with `Unavailable`
    pub fn fail_next(&self, operation: BackendOperation) -> Result<(), BackendError> {
        self.lock_failures()?.insert(operation);
        Ok(())
    }

    /// Snapshot of the stored records
    pub fn records(&self) -> Result<Vec<CategoryRecord>, BackendError> {
        Ok(self.lock_records()?.clone())
    }

    fn lock_records(&self) -> Result<MutexGuard<'_, Vec<CategoryRecord>>, BackendError> {
        self.records.lock().map_err(|_| BackendError::LockPoisoned)
    }

    fn lock_failures(&self) -> Result<MutexGuard<'_, HashSet<BackendOperation>>, BackendError> {
        self.failures.lock().map_err(|_| BackendError::LockPoisoned)
    }

    async fn begin(&self, operation: BackendOperation) -> Result<(), BackendError> {
        if let Some(latency) = self.latency {
            sleep(latency).await;
        }

        if self.lock_failures()?.remove(&operation) {
            return Err(BackendError::unavailable(format!(
                "simulated {} failure",
                operation
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TaxonomyBackend for InMemoryBackend {
    async fn fetch_tree(&self) -> Result<Vec<CategoryNode>, BackendError> {
        self.begin(BackendOperation::Fetch).await?;

        let records = self.lock_records()?;
        build_forest(&records).map_err(|e| BackendError::rejected(e.to_string()))
    }

    async fn create_node(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<CategoryNode, BackendError> {
        self.begin(BackendOperation::Create).await?;

        let mut records = self.lock_records()?;
        if let Some(parent_id) = parent_id {
            if !records.iter().any(|record| record.id == parent_id) {
                return Err(BackendError::node_not_found(parent_id));
            }
        }

        let record = CategoryRecord::new(
            Uuid::new_v4().to_string(),
            name,
            parent_id.map(str::to_string),
        );
        records.push(record.clone());

        Ok(CategoryNode {
            id: record.id,
            name: record.name,
            parent_id: record.parent_id,
            children: Vec::new(),
        })
    }

    async fn rename_node(&self, id: &str, name: &str) -> Result<CategoryNode, BackendError> {
        self.begin(BackendOperation::Rename).await?;

        let mut records = self.lock_records()?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| BackendError::node_not_found(id))?;
        record.name = name.to_string();

        Ok(CategoryNode {
            id: record.id.clone(),
            name: record.name.clone(),
            parent_id: record.parent_id.clone(),
            children: Vec::new(),
        })
    }

    async fn delete_node(&self, id: &str) -> Result<(), BackendError> {
        self.begin(BackendOperation::Delete).await?;

        let mut records = self.lock_records()?;
        if !records.iter().any(|record| record.id == id) {
            return Err(BackendError::node_not_found(id));
        }

        // Grow the doomed set until no record hangs off it any more
        let mut doomed: HashSet<String> = HashSet::from([id.to_string()]);
        loop {
            let before = doomed.len();
            for record in records.iter() {
                if record
                    .parent_id
                    .as_ref()
                    .is_some_and(|parent_id| doomed.contains(parent_id))
                {
                    doomed.insert(record.id.clone());
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        records.retain(|record| !doomed.contains(&record.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryBackend {
        InMemoryBackend::with_records(vec![
            CategoryRecord::new("fruit", "Fruit Trees", None),
            CategoryRecord::new("apple", "Apple", Some("fruit".to_string())),
            CategoryRecord::new("gala", "Gala", Some("apple".to_string())),
            CategoryRecord::new("pear", "Pear", Some("fruit".to_string())),
            CategoryRecord::new("roses", "Roses", None),
        ])
    }

    #[tokio::test]
    async fn test_fetch_tree_nests_records() {
        let backend = seeded();
        let forest = backend.fetch_tree().await.unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].subtree_len(), 4);
    }

    #[tokio::test]
    async fn test_create_under_parent() {
        let backend = seeded();

        let node = backend.create_node("Fuji", Some("apple")).await.unwrap();

        assert_eq!(node.parent_id.as_deref(), Some("apple"));
        assert!(!node.id.is_empty());
        assert_eq!(backend.records().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_fails() {
        let backend = seeded();

        let result = backend.create_node("Orphan", Some("missing")).await;

        assert_eq!(result, Err(BackendError::node_not_found("missing")));
        assert_eq!(backend.records().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_rename_updates_record() {
        let backend = seeded();

        let node = backend.rename_node("gala", "Gala Apple").await.unwrap();

        assert_eq!(node.name, "Gala Apple");
        assert_eq!(node.parent_id.as_deref(), Some("apple"));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_subtree() {
        let backend = seeded();

        backend.delete_node("fruit").await.unwrap();

        let ids: Vec<_> = backend.records().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["roses"]);
    }

    #[tokio::test]
    async fn test_delete_missing_fails() {
        let backend = seeded();
        assert!(matches!(
            backend.delete_node("missing").await,
            Err(BackendError::NodeNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fail_next_only_fails_once() {
        let backend = seeded();
        backend.fail_next(BackendOperation::Rename).unwrap();

        assert!(matches!(
            backend.rename_node("gala", "x").await,
            Err(BackendError::Unavailable(_))
        ));
        assert!(backend.rename_node("gala", "x").await.is_ok());
    }

    #[tokio::test]
    async fn test_from_forest_preserves_structure() {
        let apple = CategoryNode::new("apple", "Apple").with_child(CategoryNode::new("gala", "Gala"));
        let forest = vec![CategoryNode::new("fruit", "Fruit Trees").with_child(apple)];

        let backend = InMemoryBackend::from_forest(&forest);

        assert_eq!(backend.fetch_tree().await.unwrap(), forest);
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let backend = seeded().with_latency(Duration::from_millis(20));
        let start = std::time::Instant::now();

        backend.fetch_tree().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
