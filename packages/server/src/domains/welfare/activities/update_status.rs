use tracing::info;

use crate::common::{Actor, Capability, Confirmed, PortalError, PortalResult, WelfareId};
use crate::domains::welfare::data::WelfareData;
use crate::domains::welfare::models::{Welfare, WelfareStatus};
use crate::kernel::ServerDeps;

/// Change a welfare record's status (welfare officer).
///
/// Only the space-separated vocabulary is accepted; `not_paid` is an invalid status.
pub async fn set_welfare_status(
    actor: Actor,
    welfare_id: WelfareId,
    status: &str,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<WelfareData>> {
    actor.can(Capability::SetWelfareStatus).check()?;

    let mut row = Welfare::find_with_member(welfare_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Welfare record"))?;
    let status: WelfareStatus = status.parse()?;

    row.welfare = Welfare::update_status(welfare_id, status, &deps.db_pool).await?;

    info!(
        welfare_id = %welfare_id,
        status = %status,
        actor_id = %actor.id(),
        "Welfare status updated"
    );

    let message = format!(
        "Welfare record for {} marked as {}.",
        row.member.username,
        status.label()
    );
    Ok(Confirmed::new(message, WelfareData::from(row)))
}
