//! Hive sensor domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sensor mounted on a hive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    pub id: i64,
    pub name: String,
    pub sensor_type: String,
    pub is_active: bool,
    pub hive_id: i64,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for registering a sensor.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSensorRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(
        length(min = 1, max = 50, message = "Sensor type must be 1-50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub sensor_type: String,

    pub hive_id: i64,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Row values for inserting a sensor.
#[derive(Debug, Clone)]
pub struct NewSensor {
    pub owner_id: i64,
    pub sensor: CreateSensorRequest,
}

/// Request payload for a partial sensor update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSensorRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: Option<String>,

    pub is_active: Option<bool>,
}

/// Summary of a sensor's readings.
///
/// `last_value` and `battery_level` come from the most recent measurement;
/// every reading field is `None` when the sensor has no measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorStats {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults_to_active() {
        let json = r#"{"name": "Scale", "sensor_type": "weight", "hive_id": 1}"#;
        let request: CreateSensorRequest = serde_json::from_str(json).unwrap();
        assert!(request.is_active);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_blank_type() {
        let json = r#"{"name": "Scale", "sensor_type": " ", "hive_id": 1}"#;
        let request: CreateSensorRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_stats_without_measurements_serialize_as_null() {
        let stats = SensorStats {
            sensor_id: 5,
            sensor_name: "Thermo".to_string(),
            sensor_type: "temperature".to_string(),
            last_value: None,
            min_value: None,
            max_value: None,
            avg_value: None,
            battery_level: None,
            last_measurement_time: None,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["sensor_id"], 5);
        assert!(json["last_value"].is_null());
        assert!(json["last_measurement_time"].is_null());
    }
}
