//! Hive inspection domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single inspection record of a hive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
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

/// Request payload for recording an inspection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInspectionRequest {
    pub hive_id: i64,

    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub temperature: f64,

    #[validate(custom(function = "shared::validation::validate_humidity"))]
    pub humidity: f64,

    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: f64,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Row values for inserting an inspection.
#[derive(Debug, Clone)]
pub struct NewInspection {
    pub owner_id: i64,
    pub inspection: CreateInspectionRequest,
}

/// Request payload for a partial inspection update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInspectionRequest {
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub temperature: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_humidity"))]
    pub humidity: Option<f64>,

    #[validate(range(min = 0.0, message = "Weight must not be negative"))]
    pub weight: Option<f64>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "hive_id": 4,
            "temperature": 34.5,
            "humidity": 61.0,
            "weight": 42.3,
            "notes": "Brood pattern looks good"
        }"#;
        let request: CreateInspectionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.hive_id, 4);
        assert_eq!(request.temperature, 34.5);
        assert_eq!(request.notes.as_deref(), Some("Brood pattern looks good"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_out_of_range_values() {
        let json = r#"{
            "hive_id": 4,
            "temperature": 34.5,
            "humidity": 140.0,
            "weight": -1.0
        }"#;
        let request: CreateInspectionRequest = serde_json::from_str(json).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("humidity"));
        assert!(errors.field_errors().contains_key("weight"));
    }

    #[test]
    fn test_missing_measurement_is_rejected() {
        let json = r#"{"hive_id": 4, "temperature": 34.5, "humidity": 60.0}"#;
        assert!(serde_json::from_str::<CreateInspectionRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let request: UpdateInspectionRequest =
            serde_json::from_str(r#"{"notes": "Queen spotted"}"#).unwrap();
        assert!(request.temperature.is_none());
        assert_eq!(request.notes.as_deref(), Some("Queen spotted"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_inspection_serialization() {
        let inspection = Inspection {
            id: 9,
            hive_id: 4,
            owner_id: 2,
            temperature: 33.0,
            humidity: 58.5,
            weight: 40.0,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        let json = serde_json::to_value(&inspection).unwrap();
        assert_eq!(json["hive_id"], 4);
        assert_eq!(json["owner_id"], 2);
        assert!(json["notes"].is_null());
        assert!(json["updated_at"].is_null());
    }
}
