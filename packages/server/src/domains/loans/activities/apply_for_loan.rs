//! Apply for loan activity

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::common::auth::policy::home_path;
use crate::common::{Actor, Capability, Confirmed, PortalError, PortalResult};
use crate::domains::loans::data::{LoanApplicationForm, LoanData};
use crate::domains::loans::models::Loan;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
pub struct LoanApplied {
    pub loan: LoanData,
    /// Dashboard to return to
    pub redirect_to: &'static str,
}

/// Submit a loan application for the acting user.
///
/// Refused while the user still holds a pending or approved loan that is not
/// fully repaid.
pub async fn apply_for_loan(
    actor: Actor,
    form: LoanApplicationForm,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<LoanApplied>> {
    actor.can(Capability::ApplyForLoan).check()?;
    let amount = form.validate()?;

    if Loan::has_active_loan(actor.id(), &deps.db_pool).await? {
        warn!(member_id = %actor.id(), "Loan application blocked by active loan");
        return Err(PortalError::Conflict(
            "You already have an unpaid or active loan. Please clear it before applying again."
                .to_string(),
        ));
    }

    let loan = Loan::new_application(actor.id(), amount, today)
        .insert(&deps.db_pool)
        .await?;

    info!(
        loan_id = %loan.id,
        member_id = %loan.member_id,
        amount = %loan.amount,
        due_date = %loan.due_date,
        "Loan application submitted"
    );

    Ok(Confirmed::new(
        "Your loan application has been submitted successfully.",
        LoanApplied {
            loan: LoanData::from_loan(loan, today),
            redirect_to: home_path(actor.role()),
        },
    ))
}
