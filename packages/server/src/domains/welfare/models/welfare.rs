use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::vocabulary::text_enum;
use crate::common::{UserId, WelfareId};
use crate::domains::accounts::models::MemberName;

text_enum! {
    /// Welfare keeps a space-separated vocabulary, unlike loans and contributions.
    pub enum WelfareStatus as "welfare status" {
        PartiallyPaid => ("partially paid", "Partially Paid"),
        FullyPaid => ("fully paid", "Fully Paid"),
        NotPaid => ("not paid", "Not Paid"),
    }
}

impl Default for WelfareStatus {
    fn default() -> Self {
        WelfareStatus::NotPaid
    }
}

/// Welfare model - a disbursement to a member in need
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Welfare {
    pub id: WelfareId,
    pub member_id: UserId,
    pub description: String,
    pub amount: Decimal,
    pub date_given: NaiveDate,
    pub approved_by: Option<String>,
    pub status: WelfareStatus,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct WelfareWithMember {
    #[sqlx(flatten)]
    pub welfare: Welfare,
    #[sqlx(flatten)]
    pub member: MemberName,
}

impl Welfare {
    pub async fn find_with_member(id: WelfareId, pool: &PgPool) -> Result<Option<WelfareWithMember>> {
        sqlx::query_as::<_, WelfareWithMember>(
            "SELECT w.*, u.username, u.first_name, u.last_name
             FROM welfare w
             JOIN users u ON u.id = w.member_id
             WHERE w.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_recent_by_member(member_id: UserId, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM welfare
             WHERE member_id = $1
             ORDER BY date_given DESC, id DESC
             LIMIT $2",
        )
        .bind(member_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all_with_members(pool: &PgPool) -> Result<Vec<WelfareWithMember>> {
        sqlx::query_as::<_, WelfareWithMember>(
            "SELECT w.*, u.username, u.first_name, u.last_name
             FROM welfare w
             JOIN users u ON u.id = w.member_id
             ORDER BY w.date_given DESC, w.id DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Sum of all disbursements, optionally for one member
    pub async fn total(member_id: Option<UserId>, pool: &PgPool) -> Result<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM welfare WHERE ($1::uuid IS NULL OR member_id = $1)",
        )
        .bind(member_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn totals_by_status(pool: &PgPool) -> Result<Vec<(WelfareStatus, Decimal)>> {
        sqlx::query_as::<_, (WelfareStatus, Decimal)>(
            "SELECT status, SUM(amount) FROM welfare GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO welfare (id, member_id, description, amount, date_given, approved_by, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.member_id)
        .bind(&self.description)
        .bind(self.amount)
        .bind(self.date_given)
        .bind(&self.approved_by)
        .bind(self.status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status(id: WelfareId, status: WelfareStatus, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("UPDATE welfare SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
