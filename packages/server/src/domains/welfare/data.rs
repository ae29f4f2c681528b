use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{Welfare, WelfareStatus, WelfareWithMember};
use crate::common::money::check_money_field;
use crate::common::{PortalError, PortalResult, UserId, WelfareId};
use crate::domains::accounts::data::blank_to_none;

/// `POST /welfare`
#[derive(Debug, Clone, Deserialize)]
pub struct WelfareForm {
    pub member_id: UserId,
    pub description: String,
    pub amount: Decimal,
    pub approved_by: Option<String>,
    #[serde(default)]
    pub status: WelfareStatus,
}

impl WelfareForm {
    /// Builds the record dated `today`.
    pub fn validate(self, today: NaiveDate) -> PortalResult<Welfare> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(PortalError::validation("description", "This field is required."));
        }
        if self.amount <= Decimal::ZERO {
            return Err(PortalError::validation(
                "amount",
                "Ensure this value is greater than 0.",
            ));
        }
        let amount = check_money_field("amount", self.amount)?;
        let approved_by = blank_to_none(self.approved_by);
        if approved_by.as_deref().is_some_and(|name| name.chars().count() > 100) {
            return Err(PortalError::validation(
                "approved_by",
                "Ensure this value has at most 100 characters.",
            ));
        }

        Ok(Welfare {
            id: WelfareId::new(),
            member_id: self.member_id,
            description,
            amount,
            date_given: today,
            approved_by,
            status: self.status,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WelfareData {
    pub id: WelfareId,
    pub member_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub description: String,
    pub amount: Decimal,
    pub date_given: NaiveDate,
    pub approved_by: Option<String>,
    pub status: WelfareStatus,
}

impl From<Welfare> for WelfareData {
    fn from(welfare: Welfare) -> Self {
        Self {
            id: welfare.id,
            member_id: welfare.member_id,
            member: None,
            description: welfare.description,
            amount: welfare.amount,
            date_given: welfare.date_given,
            approved_by: welfare.approved_by,
            status: welfare.status,
        }
    }
}

impl From<WelfareWithMember> for WelfareData {
    fn from(row: WelfareWithMember) -> Self {
        let member = row.member.display_name();
        Self {
            member: Some(member),
            ..Self::from(row.welfare)
        }
    }
}
