//! Announcements domain

pub mod activities;
pub mod data;
pub mod models;

pub use data::{AnnouncementData, AnnouncementForm};
pub use models::Announcement;
