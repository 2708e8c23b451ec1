//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod alert;
pub mod hive;
pub mod inspection;
pub mod measurement;
pub mod notification;
pub mod notification_settings;
pub mod notification_template;
pub mod sensor;
pub mod user;

pub use alert::AlertEntity;
pub use hive::{HiveEntity, HiveStatsRow};
pub use inspection::InspectionEntity;
pub use measurement::MeasurementEntity;
pub use notification::NotificationEntity;
pub use notification_settings::NotificationSettingsEntity;
pub use notification_template::NotificationTemplateEntity;
pub use sensor::{SensorEntity, SensorStatsRow};
pub use user::UserEntity;

use std::str::FromStr;

/// Decodes a TEXT enum column, falling back when the stored value is unknown.
///
/// The schema constrains these columns with CHECK, so the fallback only
/// fires if the constraint and the enum drift apart.
pub(crate) fn decode_enum<T>(table: &'static str, column: &'static str, raw: &str, fallback: T) -> T
where
    T: FromStr,
{
    raw.parse().unwrap_or_else(|_| {
        tracing::warn!(table, column, value = raw, "Unknown enum value in row, using fallback");
        fallback
    })
}
