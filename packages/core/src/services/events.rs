//! Taxonomy Events
//!
//! `TaxonomyService` broadcasts one event per refresh or mutation outcome on
//! a tokio broadcast channel. The presentation layer subscribes to show
//! transient notifications; tests subscribe to assert on outcomes.
//!
//! Events are fire-and-forget: sending with no subscriber is not an error,
//! and a lagging subscriber simply misses old events.

use crate::backend::BackendOperation;
use crate::models::CategoryNode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User-facing report of a failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub operation: BackendOperation,
    /// Category the request targeted, if any
    pub node_id: Option<String>,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        operation: BackendOperation,
        node_id: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            node_id: node_id.map(str::to_string),
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// Outcome of a refresh or mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyEvent {
    /// Tree store replaced with a fresh snapshot
    TreeRefreshed { revision: u64, node_count: usize },

    /// Backend accepted a new category
    NodeCreated(CategoryNode),

    /// Backend confirmed a rename
    NodeRenamed { id: String, name: String },

    /// Backend deleted a category and its subtree
    NodeDeleted { id: String, removed_ids: Vec<String> },

    /// A request failed; local state was kept or rolled back
    MutationFailed(Notification),
}

impl TaxonomyEvent {
    /// Get a string representation of the event type
    pub fn event_type(&self) -> &str {
        match self {
            TaxonomyEvent::TreeRefreshed { .. } => "tree:refreshed",
            TaxonomyEvent::NodeCreated(_) => "node:created",
            TaxonomyEvent::NodeRenamed { .. } => "node:renamed",
            TaxonomyEvent::NodeDeleted { .. } => "node:deleted",
            TaxonomyEvent::MutationFailed(_) => "mutation:failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_types() {
        let failed = TaxonomyEvent::MutationFailed(Notification::new(
            BackendOperation::Rename,
            Some("gala"),
            "offline",
        ));
        assert_eq!(failed.event_type(), "mutation:failed");
        assert_eq!(
            TaxonomyEvent::TreeRefreshed {
                revision: 1,
                node_count: 0
            }
            .event_type(),
            "tree:refreshed"
        );
    }

    #[test]
    fn test_notification_serializes_camel_case() {
        let notification = Notification::new(BackendOperation::Delete, Some("apple"), "offline");
        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(json["operation"], "delete");
        assert_eq!(json["nodeId"], "apple");
        assert!(json["at"].is_string());
    }
}
