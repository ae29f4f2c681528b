// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BaseNotifier)

use anyhow::Result;
use async_trait::async_trait;

use super::notification_hub::NotificationEvent;

// =============================================================================
// Notifier Trait (Infrastructure - real-time push)
// =============================================================================

/// Pushes an event to every connected client.
///
/// Best-effort: callers log failures and carry on, the persisted notification
/// rows are the source of truth.
#[async_trait]
pub trait BaseNotifier: Send + Sync {
    async fn broadcast(&self, event: NotificationEvent) -> Result<()>;
}
