//! Test doubles for kernel traits.
//!
//! Public (not `#[cfg(test)]`) so integration tests under `tests/` can build a
//! `ServerDeps` without a live broadcast channel.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::notification_hub::NotificationEvent;
use super::traits::BaseNotifier;

// =============================================================================
// Recording Notifier
// =============================================================================

/// Records every broadcast for later assertions.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<NotificationEvent>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all events that were broadcast
    pub fn sent(&self) -> Vec<NotificationEvent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn was_sent_with_title(&self, title: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.title == title)
    }
}

#[async_trait]
impl BaseNotifier for MockNotifier {
    async fn broadcast(&self, event: NotificationEvent) -> Result<()> {
        self.sent.lock().unwrap().push(event);
        Ok(())
    }
}

// =============================================================================
// Failing Notifier
// =============================================================================

/// Always fails, for checking that broadcast errors never reach the caller.
#[derive(Clone, Copy, Default)]
pub struct FailingNotifier;

#[async_trait]
impl BaseNotifier for FailingNotifier {
    async fn broadcast(&self, _event: NotificationEvent) -> Result<()> {
        anyhow::bail!("broadcast channel unavailable")
    }
}
