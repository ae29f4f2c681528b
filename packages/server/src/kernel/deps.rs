//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! activities. External side effects sit behind trait objects so tests can
//! swap them out.

use sqlx::PgPool;
use std::sync::Arc;

use super::media::MediaStore;
use super::traits::BaseNotifier;

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Real-time push for new announcements and minutes
    pub notifier: Arc<dyn BaseNotifier>,
    /// Meeting-note attachments
    pub media: MediaStore,
    /// Printed on report headers and footers
    pub organization_name: String,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        notifier: Arc<dyn BaseNotifier>,
        media: MediaStore,
        organization_name: String,
    ) -> Self {
        Self {
            db_pool,
            notifier,
            media,
            organization_name,
        }
    }
}
