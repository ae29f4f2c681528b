//! Loan applications and the chairperson's decisions.

use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::{Confirmed, LoanId, PortalResult};
use crate::domains::loans::activities::{
    apply_for_loan, set_loan_status, set_repayment_status, LoanApplied,
};
use crate::domains::loans::{LoanApplicationForm, LoanData};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::today;

/// POST /apply-loan
pub async fn apply_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(form): Json<LoanApplicationForm>,
) -> PortalResult<Json<Confirmed<LoanApplied>>> {
    let applied = apply_for_loan(user.actor(), form, today(), &state.deps).await?;
    Ok(Json(applied))
}

/// POST /loan/status/{id}/{status}
pub async fn set_status_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path((id, status)): Path<(LoanId, String)>,
) -> PortalResult<Json<Confirmed<LoanData>>> {
    let updated = set_loan_status(user.actor(), id, &status, today(), &state.deps).await?;
    Ok(Json(updated))
}

/// POST /loan/update/{id}/{status}
pub async fn set_repayment_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path((id, status)): Path<(LoanId, String)>,
) -> PortalResult<Json<Confirmed<LoanData>>> {
    let updated = set_repayment_status(user.actor(), id, &status, today(), &state.deps).await?;
    Ok(Json(updated))
}
