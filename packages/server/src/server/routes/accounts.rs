use axum::{extract::Extension, Json};

use crate::common::{Capability, Confirmed, PortalError, PortalResult};
use crate::domains::accounts::activities::{register_member, update_profile};
use crate::domains::accounts::{ProfileForm, RegisterMemberForm, User, UserData};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;

/// GET /profile
pub async fn profile_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> PortalResult<Json<UserData>> {
    let profile = User::find_by_id(user.user_id, &state.deps.db_pool)
        .await?
        .ok_or(PortalError::NotFound("User"))?;
    Ok(Json(profile.into()))
}

/// POST /profile/edit
pub async fn edit_profile_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(form): Json<ProfileForm>,
) -> PortalResult<Json<Confirmed<UserData>>> {
    let updated = update_profile(user.user_id, form, &state.deps).await?;
    Ok(Json(Confirmed::new(
        "Your profile has been updated successfully.",
        updated.into(),
    )))
}

/// POST /members
pub async fn register_member_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Json(form): Json<RegisterMemberForm>,
) -> PortalResult<Json<Confirmed<UserData>>> {
    user.actor().can(Capability::ManageMembers).check()?;
    let created = register_member(form, &state.deps).await?;
    let message = format!("Member {} registered.", created.username);
    Ok(Json(Confirmed::new(message, created.into())))
}
