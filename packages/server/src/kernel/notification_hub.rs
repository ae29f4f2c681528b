//! In-process broadcast hub for real-time notifications.
//!
//! Every authenticated client subscribes to the same channel and receives every
//! event; per-recipient filtering happens through the persisted notification
//! rows, not here.
//!
//! Producers (activities, via [`BaseNotifier`]):
//!   hub.publish(NotificationEvent { .. });
//!
//! Consumers (the SSE endpoint):
//!   let rx = hub.subscribe();

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::traits::BaseNotifier;

/// Payload pushed to connected clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub title: String,
    pub message: String,
    pub link: String,
}

/// Shared broadcast channel. Cheap to clone; all clones feed the same subscribers.
#[derive(Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<NotificationEvent>,
}

impl NotificationHub {
    /// Create a hub with the default capacity (256 buffered events).
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Subscribers that fall more than `capacity` events behind see a lag
    /// instead of stalling publishers.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to every current subscriber. Returns how many received it;
    /// zero when nobody is connected.
    pub fn publish(&self, event: NotificationEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNotifier for NotificationHub {
    async fn broadcast(&self, event: NotificationEvent) -> anyhow::Result<()> {
        let delivered = self.publish(event);
        tracing::debug!(delivered, "Notification broadcast");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str) -> NotificationEvent {
        NotificationEvent {
            title: title.to_string(),
            message: "Monthly meeting moved".to_string(),
            link: "/announcements/1/".to_string(),
        }
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_every_event() {
        let hub = NotificationHub::new();
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        assert_eq!(hub.publish(event("New Announcement")), 2);

        assert_eq!(rx1.recv().await.unwrap(), event("New Announcement"));
        assert_eq!(rx2.recv().await.unwrap(), event("New Announcement"));
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let hub = NotificationHub::new();
        assert_eq!(hub.publish(event("Nobody listening")), 0);
    }

    #[tokio::test]
    async fn test_broadcast_succeeds_without_subscribers() {
        let hub = NotificationHub::new();
        hub.broadcast(event("New Meeting Note")).await.unwrap();
    }

    #[tokio::test]
    async fn test_slow_subscriber_lags() {
        let hub = NotificationHub::with_capacity(2);
        let mut rx = hub.subscribe();

        for i in 0..4 {
            hub.publish(event(&format!("event {i}")));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(2))
        ));
        assert_eq!(rx.recv().await.unwrap().title, "event 2");
    }

    #[test]
    fn test_dropped_subscribers_are_not_counted() {
        let hub = NotificationHub::new();
        let rx = hub.subscribe();
        assert_eq!(hub.subscriber_count(), 1);
        drop(rx);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
