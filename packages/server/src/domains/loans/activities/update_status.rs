//! Loan decision and repayment updates (chairperson)

use chrono::NaiveDate;
use tracing::info;

use crate::common::{Actor, Capability, Confirmed, LoanId, PortalError, PortalResult};
use crate::domains::loans::data::LoanData;
use crate::domains::loans::models::{Loan, LoanStatus, RepaymentStatus};
use crate::kernel::ServerDeps;

/// Approve, reject or reopen a loan. Reopening or rejecting resets the
/// repayment status to not paid.
pub async fn set_loan_status(
    actor: Actor,
    loan_id: LoanId,
    status: &str,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<LoanData>> {
    actor.can(Capability::SetLoanStatus).check()?;

    let mut row = Loan::find_with_member(loan_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Loan"))?;
    let status: LoanStatus = status.parse()?;

    row.loan.apply_status(status);
    row.loan = row.loan.update_status(&deps.db_pool).await?;

    info!(
        loan_id = %loan_id,
        status = %row.loan.status,
        repayment_status = %row.loan.repayment_status,
        actor_id = %actor.id(),
        "Loan status updated"
    );

    let message = format!(
        "Loan for {} marked as {}.",
        row.member.username,
        status.label()
    );
    Ok(Confirmed::new(message, LoanData::from_row(row, today)))
}

/// Record a repayment state. Recomputes interest and stamps the repayment date.
pub async fn set_repayment_status(
    actor: Actor,
    loan_id: LoanId,
    repayment_status: &str,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<LoanData>> {
    actor.can(Capability::SetLoanRepayment).check()?;

    let mut row = Loan::find_with_member(loan_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Loan"))?;
    let repayment_status: RepaymentStatus = repayment_status.parse()?;

    row.loan.apply_repayment(repayment_status, today);
    row.loan = row.loan.save(&deps.db_pool).await?;

    info!(
        loan_id = %loan_id,
        repayment_status = %row.loan.repayment_status,
        actor_id = %actor.id(),
        "Loan repayment updated"
    );

    let message = format!(
        "Loan for {} marked as {}.",
        row.member.username,
        repayment_status.label()
    );
    Ok(Confirmed::new(message, LoanData::from_row(row, today)))
}
