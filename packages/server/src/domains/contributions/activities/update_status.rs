use tracing::info;

use crate::common::{Actor, Capability, Confirmed, ContributionId, PortalError, PortalResult};
use crate::domains::contributions::data::ContributionData;
use crate::domains::contributions::models::{Contribution, ContributionStatus};
use crate::kernel::ServerDeps;

/// Change a contribution's payment status (treasurer). Nothing else is recomputed.
pub async fn set_contribution_status(
    actor: Actor,
    contribution_id: ContributionId,
    status: &str,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<ContributionData>> {
    actor.can(Capability::SetContributionStatus).check()?;

    let mut row = Contribution::find_with_member(contribution_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Contribution"))?;
    let status: ContributionStatus = status.parse()?;

    row.contribution = Contribution::update_status(contribution_id, status, &deps.db_pool).await?;

    info!(
        contribution_id = %contribution_id,
        status = %status,
        actor_id = %actor.id(),
        "Contribution status updated"
    );

    let message = format!(
        "Contribution for {} marked as {}.",
        row.member.username,
        status.label()
    );
    Ok(Confirmed::new(message, ContributionData::from(row)))
}
