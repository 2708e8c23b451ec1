//! Inspection entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the inspections table.
#[derive(Debug, Clone, FromRow)]
pub struct InspectionEntity {
    pub id: i64,
    pub hive_id: i64,
    pub owner_id: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub weight: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<InspectionEntity> for domain::models::Inspection {
    fn from(entity: InspectionEntity) -> Self {
        Self {
            id: entity.id,
            hive_id: entity.hive_id,
            owner_id: entity.owner_id,
            temperature: entity.temperature,
            humidity: entity.humidity,
            weight: entity.weight,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
