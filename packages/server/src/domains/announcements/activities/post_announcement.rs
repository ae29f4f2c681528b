use tracing::info;

use crate::common::{Actor, AnnouncementId, Capability, Confirmed, PortalError, PortalResult};
use crate::domains::announcements::data::{AnnouncementData, AnnouncementForm};
use crate::domains::announcements::models::Announcement;
use crate::domains::notifications::activities::{broadcast_notification, notify_all_users};
use crate::kernel::{NotificationEvent, ServerDeps};

pub const NOTIFICATION_TITLE: &str = "New Announcement";

/// Publish an announcement and notify every user.
///
/// The announcement and its notification rows commit together; the real-time
/// push happens after commit and never fails the request.
pub async fn post_announcement(
    actor: Actor,
    form: AnnouncementForm,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<AnnouncementData>> {
    actor.can(Capability::PostAnnouncement).check()?;
    let (title, message) = form.validate()?;

    let mut tx = deps.db_pool.begin().await?;
    let announcement = Announcement::new(title, message, actor.id())
        .insert(&mut *tx)
        .await?;

    let event = NotificationEvent {
        title: NOTIFICATION_TITLE.to_string(),
        message: announcement.title.clone(),
        link: announcement.link(),
    };
    let recipients = notify_all_users(&event, &mut *tx).await?;
    tx.commit().await?;

    info!(
        announcement_id = %announcement.id,
        recipients,
        actor_id = %actor.id(),
        "Announcement posted"
    );

    broadcast_notification(event, deps).await;

    Ok(Confirmed::new(
        "Announcement posted successfully.",
        announcement.into(),
    ))
}

pub async fn get_announcement(id: AnnouncementId, deps: &ServerDeps) -> PortalResult<AnnouncementData> {
    Announcement::find_by_id(id, &deps.db_pool)
        .await?
        .map(Into::into)
        .ok_or(PortalError::NotFound("Announcement"))
}
