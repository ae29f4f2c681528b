//! Loans domain - applications, interest, overdue penalties and repayment

pub mod activities;
pub mod data;
pub mod models;

pub use data::{LoanApplicationForm, LoanData};
pub use models::{Loan, LoanStatus, RepaymentStatus};
