//! Notifications domain - per-user inbox rows and real-time push

pub mod activities;
pub mod data;
pub mod models;

pub use data::{NotificationData, NotificationList};
pub use models::Notification;
