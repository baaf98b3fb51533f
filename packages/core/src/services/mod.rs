//! Business Services
//!
//! This module contains the session-level service of the taxonomy engine:
//!
//! - `TaxonomyService` - Refresh, view state and the mutation gateway
//! - `TaxonomyEvent` - Outcomes broadcast to subscribers
//! - `TaxonomyServiceError` - Errors returned to callers
//!
//! The service coordinates between the backend and the local snapshot,
//! applying the optimistic-rename and refetch-after-mutation rules.

pub mod error;
pub mod events;
pub mod taxonomy_service;

pub use error::TaxonomyServiceError;
pub use events::{Notification, TaxonomyEvent};
pub use taxonomy_service::TaxonomyService;
