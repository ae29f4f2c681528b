pub mod loan;

pub use loan::{
    due_date_for, interest_for, months_overdue, Loan, LoanStatus, LoanWithMember, RepaymentStatus,
};
