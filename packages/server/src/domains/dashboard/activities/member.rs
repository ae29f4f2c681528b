use chrono::{Datelike, NaiveDate};

use crate::common::{PortalError, PortalResult, UserId};
use crate::domains::accounts::models::User;
use crate::domains::announcements::models::Announcement;
use crate::domains::contributions::models::Contribution;
use crate::domains::dashboard::data::{LoanSummary, MemberDashboard, PersonalSummary};
use crate::domains::loans::data::LoanData;
use crate::domains::loans::models::Loan;
use crate::domains::meetings::models::MeetingNote;
use crate::domains::welfare::models::Welfare;
use crate::kernel::ServerDeps;

pub(crate) const RECENT_CONTRIBUTIONS: i64 = 6;
pub(crate) const RECENT_LOANS: usize = 5;
pub(crate) const RECENT_WELFARE: i64 = 5;
pub(crate) const LATEST_ANNOUNCEMENTS: i64 = 5;

/// The acting user's own figures, shared by both dashboards.
pub(crate) async fn personal_summary(
    user_id: UserId,
    recent_welfare: i64,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<PersonalSummary> {
    let pool = &deps.db_pool;
    let (contributions_ytd, loans, recent_contributions, welfare) = tokio::try_join!(
        Contribution::total_for_year(today.year(), Some(user_id), pool),
        Loan::find_by_member(user_id, pool),
        Contribution::find_recent_by_member(user_id, RECENT_CONTRIBUTIONS, pool),
        Welfare::find_recent_by_member(user_id, recent_welfare, pool),
    )?;

    let loans_summary = LoanSummary::from_loans(&loans, today);
    let loans: Vec<LoanData> = loans
        .into_iter()
        .map(|loan| LoanData::from_loan(loan, today))
        .collect();
    let recent_loans = loans.iter().take(RECENT_LOANS).cloned().collect();

    Ok(PersonalSummary {
        contributions_ytd,
        loans_summary,
        loans,
        recent_contributions: recent_contributions.into_iter().map(Into::into).collect(),
        recent_loans,
        recent_welfare: welfare.into_iter().map(Into::into).collect(),
    })
}

/// Dashboard for any authenticated user.
pub async fn member_dashboard(
    user_id: UserId,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<MemberDashboard> {
    let user = User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("User"))?;

    let personal = personal_summary(user_id, RECENT_WELFARE, today, deps).await?;
    let (announcements, meeting_notes) = tokio::try_join!(
        Announcement::find_latest(LATEST_ANNOUNCEMENTS, &deps.db_pool),
        MeetingNote::find_all(&deps.db_pool),
    )?;

    Ok(MemberDashboard {
        user: user.into(),
        this_year: today.year(),
        today,
        personal,
        latest_announcements: announcements.into_iter().map(Into::into).collect(),
        meeting_notes: meeting_notes.into_iter().map(Into::into).collect(),
    })
}
