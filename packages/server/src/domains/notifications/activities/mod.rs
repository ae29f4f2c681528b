mod fan_out;
mod inbox;

pub use fan_out::{broadcast_notification, notify_all_users};
pub use inbox::{fetch_unread, list_notifications, mark_read, UNREAD_FETCH_LIMIT};
