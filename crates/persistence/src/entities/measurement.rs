//! Measurement entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the measurements table.
#[derive(Debug, Clone, FromRow)]
pub struct MeasurementEntity {
    pub id: i64,
    pub sensor_id: i64,
    pub value: f64,
    pub battery_level: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<MeasurementEntity> for domain::models::Measurement {
    fn from(entity: MeasurementEntity) -> Self {
        Self {
            id: entity.id,
            sensor_id: entity.sensor_id,
            value: entity.value,
            battery_level: entity.battery_level,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
