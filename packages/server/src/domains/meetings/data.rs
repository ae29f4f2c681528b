use chrono::{DateTime, Utc};
use serde::Serialize;

use super::models::MeetingNote;
use crate::common::{MeetingNoteId, PortalError, PortalResult, UserId};

/// Uploaded file carried by the multipart form
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// `POST /post-minutes` (multipart)
#[derive(Debug, Clone, Default)]
pub struct MeetingNoteForm {
    pub title: String,
    pub description: String,
    pub content: String,
    pub attachment: Option<Attachment>,
}

impl MeetingNoteForm {
    pub fn validate(&self) -> PortalResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PortalError::validation("title", "This field is required."));
        }
        if title.chars().count() > 255 {
            return Err(PortalError::validation(
                "title",
                "Ensure this value has at most 255 characters.",
            ));
        }
        if let Some(attachment) = &self.attachment {
            if attachment.bytes.is_empty() {
                return Err(PortalError::validation("file", "The submitted file is empty."));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MeetingNoteData {
    pub id: MeetingNoteId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub file_url: Option<String>,
    pub posted_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl From<MeetingNote> for MeetingNoteData {
    fn from(note: MeetingNote) -> Self {
        Self {
            file_url: note.file_url(),
            id: note.id,
            title: note.title,
            description: note.description,
            content: note.content,
            posted_by: note.posted_by,
            created_at: note.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_required() {
        let form = MeetingNoteForm::default();
        assert!(matches!(
            form.validate(),
            Err(PortalError::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn test_empty_attachment_rejected() {
        let form = MeetingNoteForm {
            title: "April minutes".into(),
            attachment: Some(Attachment {
                file_name: "minutes.pdf".into(),
                bytes: Vec::new(),
            }),
            ..Default::default()
        };
        assert!(matches!(
            form.validate(),
            Err(PortalError::Validation { field: "file", .. })
        ));
    }

    #[test]
    fn test_text_only_minutes_are_valid() {
        let form = MeetingNoteForm {
            title: "April minutes".into(),
            content: "Quorum reached.".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }
}
