use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{Loan, LoanStatus, LoanWithMember, RepaymentStatus};
use crate::common::money::check_money_field;
use crate::common::{LoanId, PortalError, PortalResult, UserId};

pub const LOAN_AMOUNT_MIN: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);
pub const LOAN_AMOUNT_MAX: Decimal = Decimal::from_parts(3000, 0, 0, false, 0);

/// Inclusive bounds on a single loan.
pub fn check_loan_amount(amount: Decimal) -> PortalResult<Decimal> {
    if amount < LOAN_AMOUNT_MIN || amount > LOAN_AMOUNT_MAX {
        return Err(PortalError::validation(
            "amount",
            format!(
                "Loan amount must be between Ksh {} and Ksh {}.",
                LOAN_AMOUNT_MIN, LOAN_AMOUNT_MAX
            ),
        ));
    }
    Ok(amount)
}

/// `POST /apply-loan`
#[derive(Debug, Clone, Deserialize)]
pub struct LoanApplicationForm {
    pub amount: Decimal,
}

impl LoanApplicationForm {
    /// Bounds and cents only. The 100-shilling step is an input hint for
    /// clients; any amount inside the bounds is accepted here.
    pub fn validate(&self) -> PortalResult<Decimal> {
        check_loan_amount(check_money_field("amount", self.amount)?)
    }
}

/// Loan with its date-dependent figures resolved
#[derive(Debug, Clone, Serialize)]
pub struct LoanData {
    pub id: LoanId,
    pub member_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
    pub amount: Decimal,
    pub interest: Decimal,
    pub status: LoanStatus,
    pub repayment_status: RepaymentStatus,
    pub repayment_updated_at: Option<NaiveDate>,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub months_overdue: u32,
    pub penalty: Decimal,
    pub total_balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl LoanData {
    pub fn from_loan(loan: Loan, today: NaiveDate) -> Self {
        Self {
            months_overdue: loan.months_overdue(today),
            penalty: loan.penalty(today),
            total_balance: loan.total_balance(today),
            id: loan.id,
            member_id: loan.member_id,
            member: None,
            amount: loan.amount,
            interest: loan.interest,
            status: loan.status,
            repayment_status: loan.repayment_status,
            repayment_updated_at: loan.repayment_updated_at,
            loan_date: loan.loan_date,
            due_date: loan.due_date,
            created_at: loan.created_at,
        }
    }

    pub fn from_row(row: LoanWithMember, today: NaiveDate) -> Self {
        let member = row.member.display_name();
        Self {
            member: Some(member),
            ..Self::from_loan(row.loan, today)
        }
    }
}
