//! Hive entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Hive, HiveStatus};

use super::decode_enum;

/// Database row mapping for the hives table.
#[derive(Debug, Clone, FromRow)]
pub struct HiveEntity {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub status: String,
    pub queen_year: i32,
    pub frames_count: i32,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<HiveEntity> for Hive {
    fn from(entity: HiveEntity) -> Self {
        Self {
            id: entity.id,
            status: decode_enum("hives", "status", &entity.status, HiveStatus::Active),
            name: entity.name,
            location: entity.location,
            description: entity.description,
            queen_year: entity.queen_year,
            frames_count: entity.frames_count,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Aggregates over one hive's inspections.
#[derive(Debug, Clone, Default, FromRow)]
pub struct HiveStatsRow {
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_weight: Option<f64>,
    pub last_inspection_date: Option<DateTime<Utc>>,
}
