use tracing::info;

use crate::common::{NotificationId, PortalError, PortalResult, UserId};
use crate::domains::notifications::data::{NotificationData, NotificationList};
use crate::domains::notifications::models::Notification;
use crate::kernel::ServerDeps;

/// Unread notifications returned to polling clients
pub const UNREAD_FETCH_LIMIT: i64 = 10;

/// Every notification the user has received, newest first.
pub async fn list_notifications(user_id: UserId, deps: &ServerDeps) -> PortalResult<NotificationList> {
    let notifications = Notification::find_by_recipient(user_id, &deps.db_pool).await?;
    let unread_count = Notification::count_unread(user_id, &deps.db_pool).await?;

    Ok(NotificationList {
        notifications: notifications.into_iter().map(Into::into).collect(),
        unread_count,
    })
}

/// The newest unread notifications plus the total unread count.
pub async fn fetch_unread(user_id: UserId, deps: &ServerDeps) -> PortalResult<NotificationList> {
    let notifications = Notification::find_unread(user_id, UNREAD_FETCH_LIMIT, &deps.db_pool).await?;
    let unread_count = Notification::count_unread(user_id, &deps.db_pool).await?;

    Ok(NotificationList {
        notifications: notifications.into_iter().map(Into::into).collect(),
        unread_count,
    })
}

/// Mark one of the user's own notifications as read.
pub async fn mark_read(
    user_id: UserId,
    notification_id: NotificationId,
    deps: &ServerDeps,
) -> PortalResult<NotificationData> {
    let notification = Notification::mark_read(notification_id, user_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Notification"))?;

    info!(notification_id = %notification_id, user_id = %user_id, "Notification marked read");
    Ok(notification.into())
}
