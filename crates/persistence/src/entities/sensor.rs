//! Sensor entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::{Sensor, SensorStats};

/// Database row mapping for the sensors table.
#[derive(Debug, Clone, FromRow)]
pub struct SensorEntity {
    pub id: i64,
    pub name: String,
    pub sensor_type: String,
    pub is_active: bool,
    pub hive_id: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<SensorEntity> for Sensor {
    fn from(entity: SensorEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            sensor_type: entity.sensor_type,
            is_active: entity.is_active,
            hive_id: entity.hive_id,
            owner_id: entity.owner_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Aggregates over one sensor's measurements joined with its latest reading.
#[derive(Debug, Clone, FromRow)]
pub struct SensorStatsRow {
    pub sensor_id: i64,
    pub sensor_name: String,
    pub sensor_type: String,
    pub last_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub avg_value: Option<f64>,
    pub battery_level: Option<f64>,
    pub last_measurement_time: Option<DateTime<Utc>>,
}

impl From<SensorStatsRow> for SensorStats {
    fn from(row: SensorStatsRow) -> Self {
        Self {
            sensor_id: row.sensor_id,
            sensor_name: row.sensor_name,
            sensor_type: row.sensor_type,
            last_value: row.last_value,
            min_value: row.min_value,
            max_value: row.max_value,
            avg_value: row.avg_value,
            battery_level: row.battery_level,
            last_measurement_time: row.last_measurement_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_entity_to_domain() {
        let entity = SensorEntity {
            id: 2,
            name: "Thermo".to_string(),
            sensor_type: "temperature".to_string(),
            is_active: true,
            hive_id: 1,
            owner_id: 1,
            created_at: Utc::now(),
            updated_at: None,
        };
        let sensor: Sensor = entity.into();
        assert_eq!(sensor.id, 2);
        assert_eq!(sensor.sensor_type, "temperature");
        assert!(sensor.is_active);
    }

    #[test]
    fn test_stats_row_to_domain() {
        let row = SensorStatsRow {
            sensor_id: 2,
            sensor_name: "Thermo".to_string(),
            sensor_type: "temperature".to_string(),
            last_value: Some(15.0),
            min_value: Some(10.0),
            max_value: Some(20.0),
            avg_value: Some(15.0),
            battery_level: Some(80.0),
            last_measurement_time: None,
        };
        let stats: SensorStats = row.into();
        assert_eq!(stats.min_value, Some(10.0));
        assert_eq!(stats.battery_level, Some(80.0));
    }
}
