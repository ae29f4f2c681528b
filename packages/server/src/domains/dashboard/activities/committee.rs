use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::member::{personal_summary, LATEST_ANNOUNCEMENTS};
use crate::common::{Actor, Capability, PortalError, PortalResult};
use crate::domains::accounts::models::User;
use crate::domains::announcements::models::Announcement;
use crate::domains::contributions::models::Contribution;
use crate::domains::dashboard::data::{Charts, CommitteeDashboard, Overview, Series};
use crate::domains::loans::data::LoanData;
use crate::domains::loans::models::{Loan, LoanStatus};
use crate::domains::meetings::models::MeetingNote;
use crate::domains::welfare::models::Welfare;
use crate::kernel::ServerDeps;

const COMMITTEE_ANNOUNCEMENTS: i64 = 10;
const COMMITTEE_RECENT_WELFARE: i64 = 6;
const TOP_CONTRIBUTORS: i64 = 5;

async fn overview(year: i32, deps: &ServerDeps) -> PortalResult<Overview> {
    let pool = &deps.db_pool;
    let (total_members, total_contributions, approved_loans, pending_loans, total_welfare) = tokio::try_join!(
        User::count_members(pool),
        Contribution::total_for_year(year, None, pool),
        Loan::count_with_status(LoanStatus::Approved, pool),
        Loan::count_with_status(LoanStatus::Pending, pool),
        Welfare::total(None, pool),
    )?;

    Ok(Overview {
        total_members,
        total_contributions,
        approved_loans,
        pending_loans,
        total_welfare,
    })
}

async fn charts(year: i32, deps: &ServerDeps) -> PortalResult<Charts> {
    let pool = &deps.db_pool;
    let (monthly, loan_counts, welfare_totals, top) = tokio::try_join!(
        Contribution::monthly_totals(year, pool),
        Loan::count_by_status(pool),
        Welfare::totals_by_status(pool),
        Contribution::top_contributors(TOP_CONTRIBUTORS, pool),
    )?;

    Ok(Charts {
        monthly_contributions: monthly
            .into_iter()
            .map(|m| (m.month.format("%b").to_string(), m.total))
            .collect(),
        loans_by_status: loan_counts
            .into_iter()
            .map(|(status, count)| (status.to_string(), count))
            .collect(),
        welfare_by_status: welfare_totals
            .into_iter()
            .map(|(status, total)| (status.to_string(), total))
            .collect(),
        top_contributors: top
            .into_iter()
            .map(|c| (c.member.username, c.total))
            .collect::<Series<_>>(),
    })
}

/// Group-wide reporting view for committee roles and admins.
pub async fn committee_dashboard(
    actor: Actor,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<CommitteeDashboard> {
    actor.can(Capability::ViewCommitteeDashboard).check()?;

    let user = User::find_by_id(actor.id(), &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("User"))?;
    let year = today.year();
    let pool = &deps.db_pool;

    let (overview, charts, personal, my_welfare_total) = tokio::try_join!(
        overview(year, deps),
        charts(year, deps),
        personal_summary(actor.id(), COMMITTEE_RECENT_WELFARE, today, deps),
        async {
            Welfare::total(Some(actor.id()), pool)
                .await
                .map_err(PortalError::from)
        },
    )?;

    let (members, loans, contributions, welfare_records, announcements, meeting_notes) = tokio::try_join!(
        User::find_members_by_first_name(pool),
        Loan::find_all_with_members(pool),
        Contribution::find_all_with_members(pool),
        Welfare::find_all_with_members(pool),
        Announcement::find_latest(COMMITTEE_ANNOUNCEMENTS, pool),
        MeetingNote::find_all(pool),
    )?;

    debug!(
        actor_id = %actor.id(),
        members = members.len(),
        loans = loans.len(),
        "Committee dashboard assembled"
    );

    let user_display_name = if user.first_name.is_empty() {
        user.username.clone()
    } else {
        user.first_name.clone()
    };

    Ok(CommitteeDashboard {
        user_display_name,
        this_year: year,
        today,
        overview,
        personal,
        my_welfare_total,
        latest_announcements: announcements
            .iter()
            .take(LATEST_ANNOUNCEMENTS as usize)
            .cloned()
            .map(Into::into)
            .collect(),
        members: members.into_iter().map(Into::into).collect(),
        loans: loans
            .into_iter()
            .map(|row| LoanData::from_row(row, today))
            .collect(),
        contributions: contributions.into_iter().map(Into::into).collect(),
        welfare_records: welfare_records.into_iter().map(Into::into).collect(),
        announcements: announcements.into_iter().map(Into::into).collect(),
        meeting_notes: meeting_notes.into_iter().map(Into::into).collect(),
        charts,
    })
}
