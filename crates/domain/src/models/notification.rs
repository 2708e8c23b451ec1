//! Notification domain model.
//!
//! Notifications are queued here and delivered by an external sender that
//! polls the pending list and reports back through `mark_as_sent`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::notification_settings::NotificationPriority;
use super::notification_template::NotificationType;

/// Default number of pending notifications handed to a sender.
pub const DEFAULT_PENDING_LIMIT: i64 = 100;

/// A queued or delivered message for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub template_id: i64,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub subject: String,
    pub body: String,
    pub is_sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for queueing a notification.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub template_id: i64,
    pub notification_type: NotificationType,

    #[serde(default)]
    pub priority: NotificationPriority,

    #[validate(length(min = 1, max = 255, message = "Subject must be 1-255 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 10000, message = "Body must be 1-10000 characters"))]
    pub body: String,
}

/// Row values for inserting a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub notification: CreateNotificationRequest,
}

/// Column changes for a notification.
#[derive(Debug, Clone, Default)]
pub struct NotificationChanges {
    pub priority: Option<NotificationPriority>,
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Delivery outcome reported by a sender.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MarkSentRequest {
    #[validate(length(max = 2000, message = "Error message must be at most 2000 characters"))]
    pub error_message: Option<String>,
}

/// Query parameters for the pending queue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingQuery {
    pub limit: Option<i64>,
}

impl PendingQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PENDING_LIMIT)
            .clamp(0, shared::pagination::MAX_LIMIT)
    }
}
