//! Notification template domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::UnknownVariant;

/// Delivery channel of a notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Email,
    Sms,
    Push,
}

impl NotificationType {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Email => "email",
            NotificationType::Sms => "sms",
            NotificationType::Push => "push",
        }
    }
}

impl FromStr for NotificationType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(NotificationType::Email),
            "sms" => Ok(NotificationType::Sms),
            "push" => Ok(NotificationType::Push),
            other => Err(UnknownVariant::new("notification type", other)),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable message template, identified by a unique name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationTemplate {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub notification_type: NotificationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a template.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 10000, message = "Body must be 1-10000 characters"))]
    pub body: String,

    pub notification_type: NotificationType,
}

/// Column changes for a template.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TemplateChanges {
    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Body must be 1-10000 characters"))]
    pub body: Option<String>,

    pub notification_type: Option<NotificationType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_round_trip() {
        for kind in [
            NotificationType::Email,
            NotificationType::Sms,
            NotificationType::Push,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationType>().unwrap(), kind);
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind)
            );
        }
        assert!("pigeon".parse::<NotificationType>().is_err());
    }

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "name": "swarm_warning",
            "subject": "Swarm risk",
            "body": "Hive {hive} shows swarm signs",
            "notification_type": "push"
        }"#;
        let request: CreateTemplateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.notification_type, NotificationType::Push);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_unknown_type() {
        let json = r#"{
            "name": "swarm_warning",
            "subject": "Swarm risk",
            "body": "body",
            "notification_type": "fax"
        }"#;
        assert!(serde_json::from_str::<CreateTemplateRequest>(json).is_err());
    }
}
