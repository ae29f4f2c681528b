use chrono::NaiveDate;
use tracing::info;

use crate::common::{Actor, Capability, Confirmed, PortalError, PortalResult};
use crate::domains::accounts::models::User;
use crate::domains::welfare::data::{WelfareData, WelfareForm};
use crate::kernel::ServerDeps;

/// Record a welfare disbursement dated `today`.
pub async fn record_welfare(
    actor: Actor,
    form: WelfareForm,
    today: NaiveDate,
    deps: &ServerDeps,
) -> PortalResult<Confirmed<WelfareData>> {
    actor.can(Capability::RecordWelfare).check()?;
    let welfare = form.validate(today)?;

    let member = User::find_by_id(welfare.member_id, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("Member"))?;
    let welfare = welfare.insert(&deps.db_pool).await?;

    info!(
        welfare_id = %welfare.id,
        member_id = %member.id,
        amount = %welfare.amount,
        "Welfare disbursement recorded"
    );

    let mut data = WelfareData::from(welfare);
    data.member = Some(member.display_name());
    Ok(Confirmed::new("Welfare record added successfully.", data))
}
