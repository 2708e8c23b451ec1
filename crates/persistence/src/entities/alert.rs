//! Alert entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the alerts table.
#[derive(Debug, Clone, FromRow)]
pub struct AlertEntity {
    pub id: i64,
    pub alert_type: String,
    pub message: String,
    pub is_resolved: bool,
    pub sensor_id: i64,
    pub hive_id: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AlertEntity> for domain::models::Alert {
    fn from(entity: AlertEntity) -> Self {
        Self {
            id: entity.id,
            alert_type: entity.alert_type,
            message: entity.message,
            is_resolved: entity.is_resolved,
            sensor_id: entity.sensor_id,
            hive_id: entity.hive_id,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
