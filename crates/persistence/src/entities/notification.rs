//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Notification, NotificationPriority, NotificationType};

use super::decode_enum;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: i64,
    pub user_id: i64,
    pub template_id: i64,
    pub notification_type: String,
    pub priority: String,
    pub subject: String,
    pub body: String,
    pub is_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<NotificationEntity> for Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            template_id: entity.template_id,
            notification_type: decode_enum(
                "notifications",
                "notification_type",
                &entity.notification_type,
                NotificationType::Email,
            ),
            priority: decode_enum(
                "notifications",
                "priority",
                &entity.priority,
                NotificationPriority::Medium,
            ),
            subject: entity.subject,
            body: entity.body,
            is_sent: entity.is_sent,
            sent_at: entity.sent_at,
            error_message: entity.error_message,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
