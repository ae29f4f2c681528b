use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::vocabulary::text_enum;
use crate::common::{ContributionId, UserId};
use crate::domains::accounts::models::MemberName;

text_enum! {
    pub enum ContributionStatus as "contribution status" {
        FullyPaid => ("fully_paid", "Fully Paid"),
        PartiallyPaid => ("partially_paid", "Partially Paid"),
        Late => ("late", "Late"),
        NotPaid => ("not_paid", "Not Yet Paid"),
    }
}

impl Default for ContributionStatus {
    fn default() -> Self {
        ContributionStatus::NotPaid
    }
}

/// Contribution model - one member's payment towards one calendar month
///
/// `month` is always the first day of the month.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Contribution {
    pub id: ContributionId,
    pub member_id: UserId,
    pub amount: Decimal,
    pub month: NaiveDate,
    pub status: ContributionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ContributionWithMember {
    #[sqlx(flatten)]
    pub contribution: Contribution,
    #[sqlx(flatten)]
    pub member: MemberName,
}

/// Total per calendar month, for the trend chart
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: NaiveDate,
    pub total: Decimal,
}

/// Lifetime total for one member
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ContributorTotal {
    pub member_id: UserId,
    #[sqlx(flatten)]
    pub member: MemberName,
    pub total: Decimal,
}

impl Contribution {
    pub fn new(member_id: UserId, amount: Decimal, month: NaiveDate, status: ContributionStatus) -> Self {
        Self {
            id: ContributionId::new(),
            member_id,
            amount,
            month,
            status,
            created_at: Utc::now(),
        }
    }

    pub async fn find_with_member(id: ContributionId, pool: &PgPool) -> Result<Option<ContributionWithMember>> {
        sqlx::query_as::<_, ContributionWithMember>(
            "SELECT c.*, u.username, u.first_name, u.last_name
             FROM contributions c
             JOIN users u ON u.id = c.member_id
             WHERE c.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// A member's most recent contributions
    pub async fn find_recent_by_member(member_id: UserId, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM contributions
             WHERE member_id = $1
             ORDER BY month DESC, created_at DESC
             LIMIT $2",
        )
        .bind(member_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Every contribution with its owner, newest month first
    pub async fn find_all_with_members(pool: &PgPool) -> Result<Vec<ContributionWithMember>> {
        sqlx::query_as::<_, ContributionWithMember>(
            "SELECT c.*, u.username, u.first_name, u.last_name
             FROM contributions c
             JOIN users u ON u.id = c.member_id
             ORDER BY c.month DESC, c.created_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Sum of contributions dated in `year`, optionally for one member
    pub async fn total_for_year(year: i32, member_id: Option<UserId>, pool: &PgPool) -> Result<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0)
             FROM contributions
             WHERE EXTRACT(YEAR FROM month)::int = $1
               AND ($2::uuid IS NULL OR member_id = $2)",
        )
        .bind(year)
        .bind(member_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Monthly totals for `year`, oldest month first
    pub async fn monthly_totals(year: i32, pool: &PgPool) -> Result<Vec<MonthlyTotal>> {
        sqlx::query_as::<_, MonthlyTotal>(
            "SELECT date_trunc('month', month)::date AS month, SUM(amount) AS total
             FROM contributions
             WHERE EXTRACT(YEAR FROM month)::int = $1
             GROUP BY 1
             ORDER BY 1",
        )
        .bind(year)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Members with the largest lifetime totals
    pub async fn top_contributors(limit: i64, pool: &PgPool) -> Result<Vec<ContributorTotal>> {
        sqlx::query_as::<_, ContributorTotal>(
            "SELECT c.member_id, u.username, u.first_name, u.last_name, SUM(c.amount) AS total
             FROM contributions c
             JOIN users u ON u.id = c.member_id
             GROUP BY c.member_id, u.username, u.first_name, u.last_name
             ORDER BY total DESC, u.username
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO contributions (id, member_id, amount, month, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.member_id)
        .bind(self.amount)
        .bind(self.month)
        .bind(self.status)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status(id: ContributionId, status: ContributionStatus, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("UPDATE contributions SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
