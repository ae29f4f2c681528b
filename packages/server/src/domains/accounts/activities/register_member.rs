//! Register member activity - creates a user account with a role

use tracing::info;

use crate::common::{PortalError, PortalResult};
use crate::domains::accounts::data::{blank_to_none, RegisterMemberForm};
use crate::domains::accounts::models::{NewUser, User};
use crate::domains::auth::password::hash_password;
use crate::kernel::ServerDeps;

/// Register a new user.
///
/// Usernames and membership numbers are unique; a clash is a 409. Not gated here:
/// `POST /members` checks `ManageMembers`, and `portal-manage` runs as the operator.
pub async fn register_member(form: RegisterMemberForm, deps: &ServerDeps) -> PortalResult<User> {
    form.validate()?;

    let username = form.username.trim().to_string();
    if User::find_by_username(&username, &deps.db_pool).await?.is_some() {
        return Err(PortalError::Conflict(
            "A user with that username already exists.".to_string(),
        ));
    }

    let membership_number = blank_to_none(form.membership_number);
    if let Some(number) = &membership_number {
        if User::find_by_membership_number(number, &deps.db_pool)
            .await?
            .is_some()
        {
            return Err(PortalError::Conflict(
                "A user with that membership number already exists.".to_string(),
            ));
        }
    }

    let new_user = NewUser {
        username,
        password_hash: hash_password(&form.password)?,
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: blank_to_none(form.email),
        phone: blank_to_none(form.phone),
        membership_number,
        national_id: blank_to_none(form.national_id),
        role: form.role,
    };

    let user = User::insert(&new_user, &deps.db_pool).await?;
    info!(user_id = %user.id, username = %user.username, role = %user.role, "Member registered");

    Ok(user)
}
