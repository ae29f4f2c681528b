//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use chrono::NaiveDate;
use portal_core::common::Role;
use portal_core::domains::accounts::models::NewUser;
use portal_core::domains::accounts::User;
use portal_core::domains::auth::password::hash_password;
use portal_core::domains::contributions::{Contribution, ContributionStatus};
use portal_core::domains::loans::Loan;
use rust_decimal::Decimal;
use sqlx::PgPool;

pub const FIXTURE_PASSWORD: &str = "harambee-2024";

pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> Result<User> {
    let first_name: String = {
        let mut chars = username.chars();
        chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default()
    };

    User::insert(
        &NewUser {
            username: username.to_string(),
            password_hash: hash_password(FIXTURE_PASSWORD)?,
            first_name,
            last_name: "Test".to_string(),
            email: Some(format!("{}@example.com", username)),
            phone: None,
            membership_number: None,
            national_id: None,
            role,
        },
        pool,
    )
    .await
}

/// Insert a pending loan taken out on `loan_date`.
pub async fn create_loan(
    pool: &PgPool,
    member: &User,
    amount: i64,
    loan_date: NaiveDate,
) -> Result<Loan> {
    Loan::new_application(member.id, Decimal::from(amount), loan_date)
        .insert(pool)
        .await
}

pub async fn create_contribution(
    pool: &PgPool,
    member: &User,
    amount: i64,
    month: NaiveDate,
    status: ContributionStatus,
) -> Result<Contribution> {
    Contribution::new(member.id, Decimal::from(amount), month, status)
        .insert(pool)
        .await
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
