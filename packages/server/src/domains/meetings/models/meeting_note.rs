use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::common::{MeetingNoteId, UserId};
use crate::kernel::media::media_url;

/// MeetingNote model - minutes posted by the secretary
///
/// `file_path` is relative to the media root (e.g. `minutes/<uuid>-agm.pdf`).
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MeetingNote {
    pub id: MeetingNoteId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub file_path: Option<String>,
    pub posted_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl MeetingNote {
    pub fn file_url(&self) -> Option<String> {
        self.file_path.as_deref().map(media_url)
    }

    /// The attachment when there is one, otherwise the note's own page
    pub fn link(&self) -> String {
        self.file_url()
            .unwrap_or_else(|| format!("/minutes/{}/", self.id))
    }

    pub async fn find_by_id(id: MeetingNoteId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM meeting_notes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All minutes, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM meeting_notes ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(&self, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO meeting_notes (id, title, description, content, file_path, posted_by, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.description)
        .bind(&self.content)
        .bind(&self.file_path)
        .bind(self.posted_by)
        .bind(self.created_at)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(file_path: Option<&str>) -> MeetingNote {
        MeetingNote {
            id: MeetingNoteId::new(),
            title: "March AGM".into(),
            description: String::new(),
            content: String::new(),
            file_path: file_path.map(String::from),
            posted_by: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_link_prefers_attachment() {
        let note = note(Some("minutes/abc-agm.pdf"));
        assert_eq!(note.link(), "/media/minutes/abc-agm.pdf");
    }

    #[test]
    fn test_link_without_attachment() {
        let note = note(None);
        assert_eq!(note.link(), format!("/minutes/{}/", note.id));
        assert_eq!(note.file_url(), None);
    }
}
