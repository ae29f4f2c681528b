use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{Contribution, ContributionStatus, ContributionWithMember};
use crate::common::money::check_money_field;
use crate::common::{ContributionId, PortalError, PortalResult, UserId};

pub const MIN_CONTRIBUTION: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// `POST /contributions`
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionForm {
    pub member_id: UserId,
    pub amount: Decimal,
    /// `YYYY-MM` or any `YYYY-MM-DD` inside the month
    pub month: String,
    #[serde(default)]
    pub status: ContributionStatus,
}

/// Validated contribution fields
#[derive(Debug, Clone, PartialEq)]
pub struct NewContribution {
    pub member_id: UserId,
    pub amount: Decimal,
    pub month: NaiveDate,
    pub status: ContributionStatus,
}

impl ContributionForm {
    pub fn validate(&self) -> PortalResult<NewContribution> {
        if self.amount < MIN_CONTRIBUTION {
            return Err(PortalError::validation(
                "amount",
                format!(
                    "Ensure this value is greater than or equal to {}.",
                    MIN_CONTRIBUTION
                ),
            ));
        }
        let amount = check_money_field("amount", self.amount)?;

        Ok(NewContribution {
            member_id: self.member_id,
            amount,
            month: parse_month(&self.month)?,
            status: self.status,
        })
    }
}

/// First day of the month named by `raw`.
pub fn parse_month(raw: &str) -> PortalResult<NaiveDate> {
    let raw = raw.trim();
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .map_err(|_| PortalError::validation("month", "Enter a valid month (YYYY-MM)."))?;
    Ok(date.with_day(1).unwrap_or(date))
}

#[derive(Debug, Clone, Serialize)]
pub struct ContributionData {
    pub id: ContributionId,
    pub member_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub amount: Decimal,
    pub month: NaiveDate,
    /// e.g. "Mar 2025"
    pub month_label: String,
    pub status: ContributionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Contribution> for ContributionData {
    fn from(contribution: Contribution) -> Self {
        Self {
            id: contribution.id,
            member_id: contribution.member_id,
            member: None,
            amount: contribution.amount,
            month: contribution.month,
            month_label: contribution.month.format("%b %Y").to_string(),
            status: contribution.status,
            created_at: contribution.created_at,
        }
    }
}

impl From<ContributionWithMember> for ContributionData {
    fn from(row: ContributionWithMember) -> Self {
        let member = row.member.display_name();
        Self {
            member: Some(member),
            ..Self::from(row.contribution)
        }
    }
}
