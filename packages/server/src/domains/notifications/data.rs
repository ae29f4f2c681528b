use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::Notification;
use crate::common::NotificationId;

#[derive(Debug, Clone, Serialize)]
pub struct NotificationData {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationData {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            link: notification.link,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

/// A page of notifications with the recipient's unread count
#[derive(Debug, Clone, Serialize)]
pub struct NotificationList {
    pub notifications: Vec<NotificationData>,
    pub unread_count: i64,
}
