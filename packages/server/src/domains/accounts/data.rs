use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{ProfileChanges, User};
use crate::common::{PortalError, PortalResult, Role, UserId};

/// Public representation of a user (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_number: Option<String>,
    pub national_id: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name(),
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            membership_number: user.membership_number,
            national_id: user.national_id,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// `POST /profile/edit`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub national_id: Option<String>,
}

impl ProfileForm {
    pub fn validate(self) -> PortalResult<ProfileChanges> {
        let email = blank_to_none(self.email);
        if let Some(email) = &email {
            validate_email(email)?;
        }
        let phone = blank_to_none(self.phone);
        check_max_len("phone", phone.as_deref(), 15)?;
        let national_id = blank_to_none(self.national_id);
        check_max_len("national_id", national_id.as_deref(), 20)?;

        Ok(ProfileChanges {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email,
            phone,
            national_id,
        })
    }
}

/// `POST /members` and `portal-manage create-user`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterMemberForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_number: Option<String>,
    pub national_id: Option<String>,
    #[serde(default)]
    pub role: Role,
}

pub const MIN_PASSWORD_LEN: usize = 8;

impl RegisterMemberForm {
    /// Field checks that need no database access.
    pub fn validate(&self) -> PortalResult<()> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err(PortalError::validation("username", "This field is required."));
        }
        if username.len() > 150
            || !username
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            return Err(PortalError::validation(
                "username",
                "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters.",
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PortalError::validation(
                "password",
                format!(
                    "This password is too short. It must contain at least {} characters.",
                    MIN_PASSWORD_LEN
                ),
            ));
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            validate_email(email.trim())?;
        }
        check_max_len("phone", self.phone.as_deref(), 15)?;
        check_max_len("membership_number", self.membership_number.as_deref(), 50)?;
        check_max_len("national_id", self.national_id.as_deref(), 20)?;
        Ok(())
    }
}

pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_email(email: &str) -> PortalResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(PortalError::validation("email", "Enter a valid email address."))
    }
}

fn check_max_len(field: &'static str, value: Option<&str>, max: usize) -> PortalResult<()> {
    match value {
        Some(v) if v.trim().chars().count() > max => Err(PortalError::validation(
            field,
            format!("Ensure this value has at most {} characters.", max),
        )),
        _ => Ok(()),
    }
}
