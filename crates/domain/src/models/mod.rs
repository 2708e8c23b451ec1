//! Domain models for the apiary platform.

pub mod alert;
pub mod hive;
pub mod inspection;
pub mod measurement;
pub mod notification;
pub mod notification_settings;
pub mod notification_template;
pub mod sensor;
pub mod user;

pub use alert::Alert;
pub use hive::{Hive, HiveStatus, HiveWithStats};
pub use inspection::Inspection;
pub use measurement::Measurement;
pub use notification::Notification;
pub use notification_settings::{NotificationPriority, NotificationSettings};
pub use notification_template::{NotificationTemplate, NotificationType};
pub use sensor::{Sensor, SensorStats};
pub use user::User;

use thiserror::Error;

/// A stored or submitted enum value that matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
