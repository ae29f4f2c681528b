use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::common::{AnnouncementId, UserId};

/// Announcement model - group-wide notice from the coordinator
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub message: String,
    pub created_by: Option<UserId>,
    pub published_at: DateTime<Utc>,
}

impl Announcement {
    pub fn new(title: String, message: String, created_by: UserId) -> Self {
        Self {
            id: AnnouncementId::new(),
            title,
            message,
            created_by: Some(created_by),
            published_at: Utc::now(),
        }
    }

    /// Where notifications for this announcement point
    pub fn link(&self) -> String {
        format!("/announcements/{}/", self.id)
    }

    pub async fn find_by_id(id: AnnouncementId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM announcements WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_latest(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM announcements ORDER BY published_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(&self, conn: &mut PgConnection) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO announcements (id, title, message, created_by, published_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.message)
        .bind(self.created_by)
        .bind(self.published_at)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_has_trailing_slash() {
        let announcement = Announcement::new("AGM".into(), "Saturday 10am".into(), UserId::new());
        assert_eq!(
            announcement.link(),
            format!("/announcements/{}/", announcement.id)
        );
    }
}
