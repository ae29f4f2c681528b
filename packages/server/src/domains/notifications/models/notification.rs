use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use crate::common::{NotificationId, UserId};

/// Notification model - one row per recipient per event
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Write one unread notification for every existing user.
    ///
    /// Runs on the caller's connection so it commits or rolls back with the
    /// content row that triggered it. Returns the number of rows written.
    pub async fn fan_out(
        title: &str,
        message: &str,
        link: &str,
        conn: &mut PgConnection,
    ) -> Result<u64> {
        let result = sqlx::query(
            "INSERT INTO notifications (recipient_id, title, message, link)
             SELECT id, $1, $2, $3 FROM users",
        )
        .bind(title)
        .bind(message)
        .bind(link)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// All of a user's notifications, newest first
    pub async fn find_by_recipient(recipient_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications
             WHERE recipient_id = $1
             ORDER BY created_at DESC",
        )
        .bind(recipient_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_unread(recipient_id: UserId, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications
             WHERE recipient_id = $1 AND is_read = false
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(recipient_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_unread(recipient_id: UserId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(recipient_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Returns None when the notification does not exist or belongs to someone else.
    pub async fn mark_read(id: NotificationId, recipient_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE notifications
             SET is_read = true
             WHERE id = $1 AND recipient_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
