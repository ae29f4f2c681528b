use anyhow::Result;
use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::common::money::{round_money, LOAN_RATE};
use crate::common::vocabulary::text_enum;
use crate::common::{LoanId, UserId};
use crate::domains::accounts::models::MemberName;

text_enum! {
    /// Committee decision on an application.
    pub enum LoanStatus as "loan status" {
        Pending => ("pending", "Pending"),
        Approved => ("approved", "Approved"),
        Rejected => ("rejected", "Rejected"),
    }
}

text_enum! {
    pub enum RepaymentStatus as "repayment status" {
        NotPaid => ("not_paid", "Not Paid"),
        PartiallyPaid => ("partially_paid", "Partially Paid"),
        FullyPaid => ("fully_paid", "Fully Paid"),
    }
}

impl LoanStatus {
    /// Moving back to pending, or rejecting, clears any recorded repayment.
    pub fn resets_repayment(&self) -> bool {
        matches!(self, LoanStatus::Pending | LoanStatus::Rejected)
    }
}

/// Loan model - SQL persistence layer
///
/// `interest` is stored; `months_overdue`, `penalty` and `total_balance`
/// depend on the current date and are derived on read.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Loan {
    pub id: LoanId,
    pub member_id: UserId,
    pub amount: Decimal,
    pub interest: Decimal,
    pub status: LoanStatus,
    pub repayment_status: RepaymentStatus,
    pub repayment_updated_at: Option<NaiveDate>,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A loan joined with its owner's name
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct LoanWithMember {
    #[sqlx(flatten)]
    pub loan: Loan,
    #[sqlx(flatten)]
    pub member: MemberName,
}

/// Interest charged on a principal.
pub fn interest_for(amount: Decimal) -> Decimal {
    round_money(amount * LOAN_RATE)
}

/// One calendar month after the loan date, clamped to the end of a shorter month.
pub fn due_date_for(loan_date: NaiveDate) -> NaiveDate {
    loan_date
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole calendar months elapsed since `due_date`; 0 until the due date has passed.
pub fn months_overdue(due_date: NaiveDate, today: NaiveDate) -> u32 {
    if today <= due_date {
        return 0;
    }

    let span = (today.year() - due_date.year()) * 12 + today.month() as i32 - due_date.month() as i32;
    let mut months = u32::try_from(span).unwrap_or(0);
    while months > 0
        && due_date
            .checked_add_months(Months::new(months))
            .map_or(true, |anniversary| anniversary > today)
    {
        months -= 1;
    }
    months
}

impl Loan {
    /// A fresh application: pending, unpaid, due one month from `today`.
    pub fn new_application(member_id: UserId, amount: Decimal, today: NaiveDate) -> Self {
        Self {
            id: LoanId::new(),
            member_id,
            amount,
            interest: interest_for(amount),
            status: LoanStatus::Pending,
            repayment_status: RepaymentStatus::NotPaid,
            repayment_updated_at: Some(today),
            loan_date: today,
            due_date: due_date_for(today),
            created_at: Utc::now(),
        }
    }

    /// Pending or approved, and not yet fully repaid. A member may hold at most one.
    pub fn is_active(&self) -> bool {
        matches!(self.status, LoanStatus::Pending | LoanStatus::Approved)
            && self.repayment_status != RepaymentStatus::FullyPaid
    }

    pub fn months_overdue(&self, today: NaiveDate) -> u32 {
        months_overdue(self.due_date, today)
    }

    pub fn penalty(&self, today: NaiveDate) -> Decimal {
        round_money(self.amount * LOAN_RATE * Decimal::from(self.months_overdue(today)))
    }

    pub fn total_balance(&self, today: NaiveDate) -> Decimal {
        self.amount + self.interest + self.penalty(today)
    }

    /// Change the committee decision. Only `status` and `repayment_status` are
    /// affected; see [`Loan::update_status`].
    pub fn apply_status(&mut self, status: LoanStatus) {
        self.status = status;
        if status.resets_repayment() {
            self.repayment_status = RepaymentStatus::NotPaid;
        }
    }

    /// Record a repayment state. This is a full save: interest is recomputed
    /// and the repayment date moves to `today`.
    pub fn apply_repayment(&mut self, repayment_status: RepaymentStatus, today: NaiveDate) {
        self.repayment_status = repayment_status;
        self.interest = interest_for(self.amount);
        self.repayment_updated_at = Some(today);
    }

    pub async fn find_by_id(id: LoanId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_with_member(id: LoanId, pool: &PgPool) -> Result<Option<LoanWithMember>> {
        sqlx::query_as::<_, LoanWithMember>(
            "SELECT l.*, u.username, u.first_name, u.last_name
             FROM loans l
             JOIN users u ON u.id = l.member_id
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// A member's loans, newest first
    pub async fn find_by_member(member_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM loans WHERE member_id = $1 ORDER BY created_at DESC",
        )
        .bind(member_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Every loan with its owner, newest first (committee table and exports)
    pub async fn find_all_with_members(pool: &PgPool) -> Result<Vec<LoanWithMember>> {
        sqlx::query_as::<_, LoanWithMember>(
            "SELECT l.*, u.username, u.first_name, u.last_name
             FROM loans l
             JOIN users u ON u.id = l.member_id
             ORDER BY l.created_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// True while the member holds a pending/approved loan that is not fully repaid.
    pub async fn has_active_loan(member_id: UserId, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM loans
                WHERE member_id = $1
                  AND status IN ('pending', 'approved')
                  AND repayment_status IN ('not_paid', 'partially_paid')
             )",
        )
        .bind(member_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_with_status(status: LoanStatus, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM loans WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Loan count per status (statuses with no loans are omitted)
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(LoanStatus, i64)>> {
        sqlx::query_as::<_, (LoanStatus, i64)>(
            "SELECT status, COUNT(*) FROM loans GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO loans (
                id,
                member_id,
                amount,
                interest,
                status,
                repayment_status,
                repayment_updated_at,
                loan_date,
                due_date,
                created_at
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.member_id)
        .bind(self.amount)
        .bind(self.interest)
        .bind(self.status)
        .bind(self.repayment_status)
        .bind(self.repayment_updated_at)
        .bind(self.loan_date)
        .bind(self.due_date)
        .bind(self.created_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist only the decision fields.
    pub async fn update_status(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE loans SET status = $2, repayment_status = $3 WHERE id = $1 RETURNING *",
        )
        .bind(self.id)
        .bind(self.status)
        .bind(self.repayment_status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Persist every mutable column.
    pub async fn save(&self, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE loans
             SET amount = $2,
                 interest = $3,
                 status = $4,
                 repayment_status = $5,
                 repayment_updated_at = $6,
                 due_date = $7
             WHERE id = $1
             RETURNING *",
        )
        .bind(self.id)
        .bind(self.amount)
        .bind(self.interest)
        .bind(self.status)
        .bind(self.repayment_status)
        .bind(self.repayment_updated_at)
        .bind(self.due_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
