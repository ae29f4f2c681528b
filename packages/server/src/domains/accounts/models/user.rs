use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{Role, UserId};

/// User model - SQL persistence layer
///
/// Every member and office holder is a user; `role` decides what they may do.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_number: Option<String>,
    pub national_id: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_number: Option<String>,
    pub national_id: Option<String>,
    pub role: Role,
}

/// Self-service profile fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub national_id: Option<String>,
}

impl User {
    /// "First Last (username)", or just the username when no name is on file.
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.username)
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_membership_number(number: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE membership_number = $1")
            .bind(number)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Member table on the committee dashboard (operator accounts excluded)
    pub async fn find_members_by_first_name(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM users WHERE role <> 'admin' ORDER BY first_name, username",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Headcount shown on the committee overview (operator accounts excluded)
    pub async fn count_members(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role <> 'admin'")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn insert(new: &NewUser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (
                id,
                username,
                password_hash,
                first_name,
                last_name,
                email,
                phone,
                membership_number,
                national_id,
                role
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.membership_number)
        .bind(&new.national_id)
        .bind(new.role)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_profile(id: UserId, changes: &ProfileChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE users
             SET first_name = $2,
                 last_name = $3,
                 email = $4,
                 phone = $5,
                 national_id = $6,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone)
        .bind(&changes.national_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Permissions follow immediately; tokens issued earlier keep the old role until they expire.
    pub async fn update_role(username: &str, role: Role, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE username = $1 RETURNING *",
        )
        .bind(username)
        .bind(role)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}

/// Name columns joined onto loan, contribution and welfare rows.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MemberName {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl MemberName {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name, &self.username)
    }
}

/// Shared by every query that joins a user's name columns.
pub fn display_name(first_name: &str, last_name: &str, username: &str) -> String {
    let full_name = format!("{} {}", first_name, last_name);
    let full_name = full_name.trim();
    if full_name.is_empty() {
        username.to_string()
    } else {
        format!("{} ({})", full_name, username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_full_name() {
        assert_eq!(display_name("Grace", "Atieno", "gatieno"), "Grace Atieno (gatieno)");
    }

    #[test]
    fn test_display_name_with_partial_name() {
        assert_eq!(display_name("", "Otieno", "otieno"), "Otieno (otieno)");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(display_name("", " ", "member7"), "member7");
    }
}
