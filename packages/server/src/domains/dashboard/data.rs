//! Dashboard view models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domains::accounts::UserData;
use crate::domains::announcements::AnnouncementData;
use crate::domains::contributions::ContributionData;
use crate::domains::loans::{Loan, LoanData};
use crate::domains::meetings::MeetingNoteData;
use crate::domains::welfare::WelfareData;

/// Figures over a member's active loans
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoanSummary {
    pub active_loan_count: usize,
    /// Principal of active loans
    pub outstanding_principal: Decimal,
    /// Amount + interest + penalty of active loans
    pub loan_balance: Decimal,
    pub can_apply_loan: bool,
}

impl LoanSummary {
    pub fn from_loans(loans: &[Loan], today: NaiveDate) -> Self {
        let active: Vec<&Loan> = loans.iter().filter(|loan| loan.is_active()).collect();
        Self {
            active_loan_count: active.len(),
            outstanding_principal: active.iter().map(|loan| loan.amount).sum(),
            loan_balance: active.iter().map(|loan| loan.total_balance(today)).sum(),
            can_apply_loan: active.is_empty(),
        }
    }
}

/// What every user sees about their own account
#[derive(Debug, Clone, Serialize)]
pub struct PersonalSummary {
    pub contributions_ytd: Decimal,
    #[serde(flatten)]
    pub loans_summary: LoanSummary,
    /// All own loans, newest first
    pub loans: Vec<LoanData>,
    pub recent_contributions: Vec<ContributionData>,
    pub recent_loans: Vec<LoanData>,
    pub recent_welfare: Vec<WelfareData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberDashboard {
    pub user: UserData,
    pub this_year: i32,
    pub today: NaiveDate,
    #[serde(flatten)]
    pub personal: PersonalSummary,
    pub latest_announcements: Vec<AnnouncementData>,
    pub meeting_notes: Vec<MeetingNoteData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    /// Everyone except operator accounts
    pub total_members: i64,
    /// Contributions dated in the current year, all members
    pub total_contributions: Decimal,
    pub approved_loans: i64,
    pub pending_loans: i64,
    pub total_welfare: Decimal,
}

/// Parallel label/value arrays, ready for a chart library
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series<T> {
    pub labels: Vec<String>,
    pub values: Vec<T>,
}

impl<T> FromIterator<(String, T)> for Series<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let (labels, values) = iter.into_iter().unzip();
        Self { labels, values }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Charts {
    /// Current year, labelled "Jan", "Feb", ...
    pub monthly_contributions: Series<Decimal>,
    pub loans_by_status: Series<i64>,
    pub welfare_by_status: Series<Decimal>,
    pub top_contributors: Series<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitteeDashboard {
    pub user_display_name: String,
    pub this_year: i32,
    pub today: NaiveDate,
    pub overview: Overview,
    pub personal: PersonalSummary,
    pub my_welfare_total: Decimal,
    pub latest_announcements: Vec<AnnouncementData>,
    pub members: Vec<UserData>,
    pub loans: Vec<LoanData>,
    pub contributions: Vec<ContributionData>,
    pub welfare_records: Vec<WelfareData>,
    pub announcements: Vec<AnnouncementData>,
    pub meeting_notes: Vec<MeetingNoteData>,
    pub charts: Charts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::UserId;
    use crate::domains::loans::{LoanStatus, RepaymentStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_of_no_loans() {
        let summary = LoanSummary::from_loans(&[], date(2025, 5, 1));
        assert_eq!(summary.active_loan_count, 0);
        assert_eq!(summary.loan_balance, Decimal::ZERO);
        assert!(summary.can_apply_loan);
    }

    #[test]
    fn test_summary_counts_only_active_loans() {
        let member = UserId::new();
        let mut repaid = Loan::new_application(member, Decimal::from(3000), date(2025, 1, 5));
        repaid.apply_status(LoanStatus::Approved);
        repaid.apply_repayment(RepaymentStatus::FullyPaid, date(2025, 2, 1));

        let mut rejected = Loan::new_application(member, Decimal::from(1000), date(2025, 2, 5));
        rejected.apply_status(LoanStatus::Rejected);

        let mut current = Loan::new_application(member, Decimal::from(2000), date(2025, 3, 10));
        current.apply_status(LoanStatus::Approved);

        // due 2025-04-10, one month overdue on 2025-05-12
        let summary = LoanSummary::from_loans(&[repaid, rejected, current], date(2025, 5, 12));
        assert_eq!(summary.active_loan_count, 1);
        assert_eq!(summary.outstanding_principal, Decimal::from(2000));
        assert_eq!(summary.loan_balance, Decimal::from(2400));
        assert!(!summary.can_apply_loan);
    }

    #[test]
    fn test_series_from_pairs() {
        let series: Series<i64> = vec![("pending".to_string(), 2), ("approved".to_string(), 5)]
            .into_iter()
            .collect();
        assert_eq!(series.labels, vec!["pending", "approved"]);
        assert_eq!(series.values, vec![2, 5]);
    }
}
