//! Meeting minutes, posted as multipart so a document can ride along.

use axum::{
    extract::{multipart::MultipartError, Extension, Multipart, Path},
    Json,
};

use crate::common::{Confirmed, MeetingNoteId, PortalError, PortalResult};
use crate::domains::meetings::activities::{get_meeting_note, post_meeting_note};
use crate::domains::meetings::{Attachment, MeetingNoteData, MeetingNoteForm};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

fn malformed(err: MultipartError) -> PortalError {
    PortalError::validation("file", format!("Malformed upload: {}", err.body_text()))
}

/// Collect the `title`, `description`, `content` and `file` parts.
async fn read_form(mut multipart: Multipart) -> PortalResult<MeetingNoteForm> {
    let mut form = MeetingNoteForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = field.text().await.map_err(malformed)?,
            "description" => form.description = field.text().await.map_err(malformed)?,
            "content" => form.content = field.text().await.map_err(malformed)?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(malformed)?;
                // Browsers send a nameless empty part when no file was chosen
                if !(file_name.is_empty() && bytes.is_empty()) {
                    form.attachment = Some(Attachment {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /post-minutes
pub async fn post_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    multipart: Multipart,
) -> PortalResult<Json<Confirmed<MeetingNoteData>>> {
    let form = read_form(multipart).await?;
    Ok(Json(post_meeting_note(user.actor(), form, &state.deps).await?))
}

/// GET /minutes/{id}/
pub async fn detail_handler(
    Extension(state): Extension<AxumAppState>,
    _user: AuthUser,
    Path(id): Path<MeetingNoteId>,
) -> PortalResult<Json<MeetingNoteData>> {
    Ok(Json(get_meeting_note(id, &state.deps).await?))
}
