use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::Announcement;
use crate::common::{AnnouncementId, PortalError, PortalResult, UserId};

/// `POST /post-announcement`
#[derive(Debug, Clone, Deserialize)]
pub struct AnnouncementForm {
    pub title: String,
    pub message: String,
}

impl AnnouncementForm {
    pub fn validate(self) -> PortalResult<(String, String)> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(PortalError::validation("title", "This field is required."));
        }
        if title.chars().count() > 200 {
            return Err(PortalError::validation(
                "title",
                "Ensure this value has at most 200 characters.",
            ));
        }
        let message = self.message.trim().to_string();
        if message.is_empty() {
            return Err(PortalError::validation("message", "This field is required."));
        }
        Ok((title, message))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementData {
    pub id: AnnouncementId,
    pub title: String,
    pub message: String,
    pub created_by: Option<UserId>,
    pub published_at: DateTime<Utc>,
}

impl From<Announcement> for AnnouncementData {
    fn from(announcement: Announcement) -> Self {
        Self {
            id: announcement.id,
            title: announcement.title,
            message: announcement.message,
            created_by: announcement.created_by,
            published_at: announcement.published_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_rejected() {
        let form = AnnouncementForm {
            title: " ".into(),
            message: "Meeting moved".into(),
        };
        assert!(matches!(
            form.validate(),
            Err(PortalError::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn test_long_title_rejected() {
        let form = AnnouncementForm {
            title: "x".repeat(201),
            message: "Meeting moved".into(),
        };
        assert!(form.validate().is_err());
    }
}
