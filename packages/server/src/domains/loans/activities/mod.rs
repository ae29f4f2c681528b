//! Loan activities - applications and committee decisions

mod apply_for_loan;
mod update_status;

pub use apply_for_loan::{apply_for_loan, LoanApplied};
pub use update_status::{set_loan_status, set_repayment_status};
