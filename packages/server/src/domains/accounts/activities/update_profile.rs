use tracing::info;

use crate::common::{PortalError, PortalResult, UserId};
use crate::domains::accounts::data::ProfileForm;
use crate::domains::accounts::models::User;
use crate::kernel::ServerDeps;

/// Apply a user's own profile edit.
pub async fn update_profile(user_id: UserId, form: ProfileForm, deps: &ServerDeps) -> PortalResult<User> {
    let changes = form.validate()?;

    let user = User::update_profile(user_id, &changes, &deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("User"))?;

    info!(user_id = %user.id, "Profile updated");
    Ok(user)
}
