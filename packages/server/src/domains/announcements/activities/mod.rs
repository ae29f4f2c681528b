mod post_announcement;

pub use post_announcement::{get_announcement, post_announcement, NOTIFICATION_TITLE};
