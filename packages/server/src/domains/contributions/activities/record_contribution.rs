use tracing::info;

use crate::common::{Actor, Capability, Confirmed, PortalError, PortalResult};
use crate::domains::accounts::models::User;
use crate::domains::contributions::data::{ContributionData, ContributionForm};
use crate::domains::contributions::models::Contribution;
use crate::kernel::ServerDeps;

/// Record a member's contribution for a month.
pub async fn record_contribution(
    actor: Actor,
    form: ContributionForm,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<ContributionData>> {
    actor.can(Capability::RecordContribution).check()?;
    let new = form.validate()?;

    let member = User::find_by_id(new.member_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Member"))?;

    let contribution = Contribution::new(member.id, new.amount, new.month, new.status)
        .insert(&deps.db_pool)
        .await?;

    info!(
        contribution_id = %contribution.id,
        member_id = %member.id,
        amount = %contribution.amount,
        month = %contribution.month,
        "Contribution recorded"
    );

    let mut data = ContributionData::from(contribution);
    data.member = Some(member.display_name());
    Ok(Confirmed::new("Contribution recorded successfully.", data))
}
