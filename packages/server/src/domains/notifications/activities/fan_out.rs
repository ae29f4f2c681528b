//! Content notifications: persisted per user, then pushed in real time.

use sqlx::PgConnection;
use tracing::{debug, warn};

use crate::common::PortalResult;
use crate::domains::notifications::models::Notification;
use crate::kernel::{NotificationEvent, ServerDeps};

/// Write the per-user rows for `event` on the creating transaction.
pub async fn notify_all_users(event: &NotificationEvent, conn: &mut PgConnection) -> PortalResult<u64> {
    let written =
        Notification::fan_out(&event.title, &event.message, &event.link, conn).await?;
    debug!(title = %event.title, recipients = written, "Notifications written");
    Ok(written)
}

/// Push `event` to every connected client. Call only after the rows are committed.
///
/// Failures are logged and swallowed; the stored notifications remain.
pub async fn broadcast_notification(event: NotificationEvent, deps: &ServerDeps) {
    let title = event.title.clone();
    if let Err(e) = deps.notifier.broadcast(event).await {
        warn!(title = %title, error = %e, "Real-time notification broadcast failed");
    }
}
