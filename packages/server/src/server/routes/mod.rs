// HTTP route handlers
pub mod accounts;
pub mod announcements;
pub mod auth;
pub mod contributions;
pub mod dashboard;
pub mod exports;
pub mod health;
pub mod loans;
pub mod meetings;
pub mod notifications;
pub mod stream;
pub mod welfare;

pub use health::*;
pub use stream::*;

/// Date used for interest, due dates and overdue penalties
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
