//! Notification template entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{NotificationTemplate, NotificationType};

use super::decode_enum;

/// Database row mapping for the notification_templates table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationTemplateEntity {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub notification_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<NotificationTemplateEntity> for NotificationTemplate {
    fn from(entity: NotificationTemplateEntity) -> Self {
        Self {
            id: entity.id,
            notification_type: decode_enum(
                "notification_templates",
                "notification_type",
                &entity.notification_type,
                NotificationType::Email,
            ),
            name: entity.name,
            subject: entity.subject,
            body: entity.body,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
