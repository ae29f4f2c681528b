// Business domains
pub mod accounts;
pub mod announcements;
pub mod auth;
pub mod contributions;
pub mod dashboard;
pub mod exports;
pub mod loans;
pub mod meetings;
pub mod notifications;
pub mod welfare;
