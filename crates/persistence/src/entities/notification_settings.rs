//! Notification settings entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{NotificationPriority, NotificationSettings};

use super::decode_enum;

/// Database row mapping for the notification_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationSettingsEntity {
    pub id: i64,
    pub user_id: i64,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub push_enabled: bool,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub min_priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<NotificationSettingsEntity> for NotificationSettings {
    fn from(entity: NotificationSettingsEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            email_enabled: entity.email_enabled,
            sms_enabled: entity.sms_enabled,
            push_enabled: entity.push_enabled,
            min_priority: decode_enum(
                "notification_settings",
                "min_priority",
                &entity.min_priority,
                NotificationPriority::Medium,
            ),
            email_address: entity.email_address,
            phone_number: entity.phone_number,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
