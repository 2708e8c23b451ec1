//! Per-user notification preferences.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::UnknownVariant;

/// Notification urgency. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl NotificationPriority {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Medium => "medium",
            NotificationPriority::High => "high",
        }
    }
}

impl FromStr for NotificationPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(NotificationPriority::Low),
            "medium" => Ok(NotificationPriority::Medium),
            "high" => Ok(NotificationPriority::High),
            other => Err(UnknownVariant::new("notification priority", other)),
        }
    }
}

impl fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel switches and contact details of one user. At most one per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub id: i64,
    pub user_id: i64,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub min_priority: NotificationPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating settings.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSettingsRequest {
    #[serde(default = "default_true")]
    pub email_enabled: bool,

    #[serde(default)]
    pub sms_enabled: bool,

    #[serde(default = "default_true")]
    pub push_enabled: bool,

    #[validate(email(message = "Invalid email format"))]
    pub email_address: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub phone_number: Option<String>,

    #[serde(default)]
    pub min_priority: NotificationPriority,
}

impl Default for CreateSettingsRequest {
    fn default() -> Self {
        Self {
            email_enabled: true,
            sms_enabled: false,
            push_enabled: true,
            email_address: None,
            phone_number: None,
            min_priority: NotificationPriority::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Row values for inserting a user's settings.
#[derive(Debug, Clone)]
pub struct NewSettings {
    pub user_id: i64,
    pub settings: CreateSettingsRequest,
}

/// Request payload for a partial settings update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    pub email_enabled: Option<bool>,
    pub sms_enabled: Option<bool>,
    pub push_enabled: Option<bool>,

    #[validate(email(message = "Invalid email format"))]
    pub email_address: Option<String>,

    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub phone_number: Option<String>,

    pub min_priority: Option<NotificationPriority>,
}
