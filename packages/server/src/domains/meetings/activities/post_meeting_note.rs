use chrono::Utc;
use tracing::{info, warn};

use crate::common::{Actor, Capability, Confirmed, MeetingNoteId, PortalError, PortalResult};
use crate::domains::meetings::data::{MeetingNoteData, MeetingNoteForm};
use crate::domains::meetings::models::MeetingNote;
use crate::domains::notifications::activities::{broadcast_notification, notify_all_users};
use crate::kernel::{NotificationEvent, ServerDeps};

pub const NOTIFICATION_TITLE: &str = "New Meeting Note";
pub const ATTACHMENT_FOLDER: &str = "minutes";

/// Post meeting minutes and notify every user.
///
/// The attachment is written first; the note and its notification rows then
/// commit together and the real-time push follows the commit. If the commit
/// fails the attachment is deleted again.
pub async fn post_meeting_note(
    actor: Actor,
    form: MeetingNoteForm,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<MeetingNoteData>> {
    actor.can(Capability::PostMeetingNote).check()?;
    form.validate()?;

    let file_path = match &form.attachment {
        Some(attachment) => Some(
            deps.media
                .save(ATTACHMENT_FOLDER, &attachment.file_name, &attachment.bytes)
                .await?
                .relative_path,
        ),
        None => None,
    };

    let note = MeetingNote {
        id: MeetingNoteId::new(),
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        content: form.content,
        file_path: file_path.clone(),
        posted_by: Some(actor.id()),
        created_at: Utc::now(),
    };

    let (note, event, recipients) = match insert_with_notifications(note, deps).await {
        Ok(inserted) => inserted,
        Err(e) => {
            if let Some(path) = &file_path {
                if let Err(cleanup) = deps.media.remove(path).await {
                    warn!(error = %cleanup, "Orphaned meeting attachment");
                }
            }
            return Err(e);
        }
    };

    info!(
        meeting_note_id = %note.id,
        has_attachment = note.file_path.is_some(),
        recipients,
        actor_id = %actor.id(),
        "Meeting minutes posted"
    );

    broadcast_notification(event, deps).await;

    Ok(Confirmed::new(
        "Meeting minutes posted successfully.",
        note.into(),
    ))
}

/// Note row plus one notification per user, in one transaction.
async fn insert_with_notifications(
    note: MeetingNote,
    deps: &ServerDeps,
) -> PortalResult<(MeetingNote, NotificationEvent, u64)> {
    let mut tx = deps.db_pool.begin().await?;
    let note = note.insert(&mut *tx).await?;

    let event = NotificationEvent {
        title: NOTIFICATION_TITLE.to_string(),
        message: note.title.clone(),
        link: note.link(),
    };
    let recipients = notify_all_users(&event, &mut *tx).await?;
    tx.commit().await?;

    Ok((note, event, recipients))
}

pub async fn get_meeting_note(id: MeetingNoteId, deps: &ServerDeps) -> PortalResult<MeetingNoteData> {
    MeetingNote::find_by_id(id, &deps.db_pool)
        .await?
        .map(Into::into)
        .ok_or(PortalError::NotFound("Meeting note"))
}
