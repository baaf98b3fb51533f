//! Taxonomy Service - Session State and Mutation Gateway
//!
//! `TaxonomyService` owns everything one taxonomy session needs:
//!
//! - The tree snapshot (`TreeStore`), replaced wholesale on every refresh
//! - The UI state (`ViewState`): filter text and open categories
//! - The backend handle through which all mutations travel
//! - A broadcast channel carrying `TaxonomyEvent`s to subscribers
//!
//! # Mutation Flow
//!
//! - **Create** validates the name, asks the backend, then refetches the
//!   whole tree. Nothing is inserted locally ahead of the backend.
//! - **Rename** is optimistic: the new label shows immediately and is
//!   reverted through a `PendingRename` if the backend refuses.
//! - **Delete** asks the backend first, drops the subtree from the open set
//!   and refetches. If that refetch fails the subtree is pruned locally.
//!
//! Failures never end the session. Each one is logged, broadcast as
//! `TaxonomyEvent::MutationFailed` and returned to the caller.

use crate::backend::{BackendOperation, TaxonomyBackend};
use crate::config::TaxonomyConfig;
use crate::models::{normalize_name, CategoryNode, FilterState, VisibleRow};
use crate::operations::PendingRename;
use crate::services::error::TaxonomyServiceError;
use crate::services::events::{Notification, TaxonomyEvent};
use crate::tree::{CategoryTree, TreeStore};
use crate::view::ViewState;
use std::fmt;
use std::sync::Arc;
use tokio::sync::broadcast;

pub struct TaxonomyService {
    backend: Arc<dyn TaxonomyBackend>,
    config: TaxonomyConfig,
    store: TreeStore,
    view: ViewState,
    event_tx: broadcast::Sender<TaxonomyEvent>,
}

impl fmt::Debug for TaxonomyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxonomyService")
            .field("config", &self.config)
            .field("revision", &self.store.revision())
            .field("node_count", &self.store.tree().len())
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl TaxonomyService {
    /// Create a service with default configuration and an empty snapshot.
    ///
    /// Call [`TaxonomyService::refresh`] to load the first snapshot.
    pub fn new(backend: Arc<dyn TaxonomyBackend>) -> Self {
        let config = TaxonomyConfig::default();
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity);

        Self {
            backend,
            config,
            store: TreeStore::new(),
            view: ViewState::new(),
            event_tx,
        }
    }

    /// Create a service with explicit configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` fails validation.
    pub fn with_config(
        backend: Arc<dyn TaxonomyBackend>,
        config: TaxonomyConfig,
    ) -> Result<Self, TaxonomyServiceError> {
        config
            .validate()
            .map_err(TaxonomyServiceError::invalid_config)?;
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity);

        Ok(Self {
            backend,
            config,
            store: TreeStore::new(),
            view: ViewState::new(),
            event_tx,
        })
    }

    /// Subscribe to refresh and mutation outcomes
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nursery_core::backend::InMemoryBackend;
    /// use nursery_core::services::{TaxonomyEvent, TaxonomyService};
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let mut service = TaxonomyService::new(Arc::new(InMemoryBackend::new()));
    /// let mut events = service.subscribe();
    ///
    /// service.refresh().await.unwrap();
    /// assert!(matches!(events.recv().await, Ok(TaxonomyEvent::TreeRefreshed { .. })));
    /// # }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<TaxonomyEvent> {
        self.event_tx.subscribe()
    }

    fn emit_event(&self, event: TaxonomyEvent) {
        let _ = self.event_tx.send(event);
    }

    fn notify_failure(
        &self,
        operation: BackendOperation,
        node_id: Option<&str>,
        error: &impl fmt::Display,
    ) {
        tracing::warn!(
            "Taxonomy {} failed for {}: {}",
            operation,
            node_id.unwrap_or("<tree>"),
            error
        );
        self.emit_event(TaxonomyEvent::MutationFailed(Notification::new(
            operation,
            node_id,
            error.to_string(),
        )));
    }

    pub fn config(&self) -> &TaxonomyConfig {
        &self.config
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn tree(&self) -> &CategoryTree {
        self.store.tree()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn filter(&self) -> &FilterState {
        self.view.filter()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.view.expansion().is_open(id)
    }

    /// Fetch the whole tree and replace the local snapshot.
    ///
    /// The open set is pruned of ids the new snapshot lacks and an active
    /// filter is re-applied. On failure the previous snapshot stays in place.
    ///
    /// # Returns
    ///
    /// The new store revision.
    pub async fn refresh(&mut self) -> Result<u64, TaxonomyServiceError> {
        let forest = match self.backend.fetch_tree().await {
            Ok(forest) => forest,
            Err(e) => {
                self.notify_failure(BackendOperation::Fetch, None, &e);
                return Err(e.into());
            }
        };

        let revision = match self.store.replace(forest) {
            Ok(revision) => revision,
            Err(e) => {
                self.notify_failure(BackendOperation::Fetch, None, &e);
                return Err(e.into());
            }
        };

        self.view.refresh(self.store.tree());

        let node_count = self.store.tree().len();
        tracing::info!(
            "Taxonomy refreshed: revision {} with {} categories",
            revision,
            node_count
        );
        self.emit_event(TaxonomyEvent::TreeRefreshed {
            revision,
            node_count,
        });

        Ok(revision)
    }

    /// Replace the filter text and re-derive the open set
    pub fn set_filter(&mut self, filter: FilterState) {
        tracing::debug!("Applying filter {:?}", filter);
        self.view.set_filter(self.store.tree(), filter);
    }

    /// Rows for the current snapshot, filter and open set
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.view.rows(self.store.tree())
    }

    /// Apply `filter` and return the resulting rows
    pub fn get_visible_rows(&mut self, filter: FilterState) -> Vec<VisibleRow> {
        self.set_filter(filter);
        self.visible_rows()
    }

    /// Open or close one category. No effect while a filter drives expansion.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.view.toggle(self.store.tree(), id)
    }

    pub fn expand_all(&mut self) -> bool {
        self.view.expand_all(self.store.tree())
    }

    pub fn collapse_all(&mut self) -> bool {
        self.view.collapse_all()
    }

    /// Create a category under `parent_id`, or as a root when `None`.
    ///
    /// The name is normalized and validated locally first; a rejected name
    /// never reaches the backend. On success the tree is refetched. A failed
    /// refetch is reported but does not fail the create.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name for the new category
    /// * `parent_id` - Parent category, existence is checked by the backend
    ///
    /// # Returns
    ///
    /// The category as created by the backend.
    pub async fn create(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<CategoryNode, TaxonomyServiceError> {
        let name = normalize_name(name, self.config.trim_names, self.config.max_name_length)?;

        let node = match self.backend.create_node(&name, parent_id).await {
            Ok(node) => node,
            Err(e) => {
                self.notify_failure(BackendOperation::Create, parent_id, &e);
                return Err(e.into());
            }
        };

        tracing::info!("Created category {} ({})", node.name, node.id);
        self.emit_event(TaxonomyEvent::NodeCreated(node.clone()));

        if let Err(e) = self.refresh().await {
            tracing::warn!("Refresh after create of {} failed: {}", node.id, e);
        }

        Ok(node)
    }

    /// Rename a category, showing the new label before the backend answers.
    ///
    /// If the backend refuses, the previous label is restored. The label the
    /// backend returns wins over the submitted one. Every local label change
    /// re-runs an active filter, so the open set follows the edited tree.
    pub async fn rename(
        &mut self,
        id: &str,
        name: &str,
    ) -> Result<CategoryNode, TaxonomyServiceError> {
        let name = normalize_name(name, self.config.trim_names, self.config.max_name_length)?;

        let pending = match PendingRename::prepare(self.store.tree(), id, name) {
            Some(pending) => pending,
            None => {
                let error = TaxonomyServiceError::node_not_found(id);
                self.notify_failure(BackendOperation::Rename, Some(id), &error);
                return Err(error);
            }
        };

        pending.apply(self.store.tree_mut());
        self.view.resync(self.store.tree());
        tracing::debug!(
            "Optimistic rename of {}: {:?} -> {:?}",
            id,
            pending.previous(),
            pending.next()
        );

        match self.backend.rename_node(id, pending.next()).await {
            Ok(node) => {
                if node.name != pending.next() {
                    self.store.tree_mut().rename(id, node.name.clone());
                    self.view.resync(self.store.tree());
                }
                tracing::info!("Renamed category {} to {}", id, node.name);
                self.emit_event(TaxonomyEvent::NodeRenamed {
                    id: id.to_string(),
                    name: node.name.clone(),
                });
                Ok(node)
            }
            Err(e) => {
                pending.compensate(self.store.tree_mut());
                self.view.resync(self.store.tree());
                self.notify_failure(BackendOperation::Rename, Some(id), &e);
                Err(e.into())
            }
        }
    }

    /// Delete a category and its whole subtree.
    ///
    /// Nothing changes locally until the backend confirms. The removed ids
    /// are dropped from the open set and the tree is refetched; if the
    /// refetch fails the subtree is pruned from the local snapshot instead.
    ///
    /// # Returns
    ///
    /// The ids removed from the local snapshot, `id` first.
    pub async fn delete(&mut self, id: &str) -> Result<Vec<String>, TaxonomyServiceError> {
        let mut removed_ids = self.store.tree().subtree_ids(id);
        if removed_ids.is_empty() {
            removed_ids.push(id.to_string());
        }

        if let Err(e) = self.backend.delete_node(id).await {
            self.notify_failure(BackendOperation::Delete, Some(id), &e);
            return Err(e.into());
        }

        let forgotten = self.view.forget(&removed_ids);
        tracing::info!(
            "Deleted category {} ({} categories, {} were open)",
            id,
            removed_ids.len(),
            forgotten
        );

        if let Err(e) = self.refresh().await {
            tracing::warn!(
                "Refresh after delete of {} failed, pruning locally: {}",
                id,
                e
            );
            self.store.tree_mut().remove_subtree(id);
            self.view.refresh(self.store.tree());
        }

        self.emit_event(TaxonomyEvent::NodeDeleted {
            id: id.to_string(),
            removed_ids: removed_ids.clone(),
        });

        Ok(removed_ids)
    }
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "taxonomy_service_test.rs"]
mod taxonomy_service_test;
