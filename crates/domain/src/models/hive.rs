//! Hive domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::inspection::Inspection;
use super::UnknownVariant;

/// Lifecycle state of a hive.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HiveStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
}

impl HiveStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HiveStatus::Active => "active",
            HiveStatus::Inactive => "inactive",
            HiveStatus::Maintenance => "maintenance",
        }
    }
}

impl FromStr for HiveStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(HiveStatus::Active),
            "inactive" => Ok(HiveStatus::Inactive),
            "maintenance" => Ok(HiveStatus::Maintenance),
            other => Err(UnknownVariant::new("hive status", other)),
        }
    }
}

impl fmt::Display for HiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a beehive owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hive {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub status: HiveStatus,
    pub queen_year: i32,
    pub frames_count: i32,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a hive.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHiveRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub status: HiveStatus,

    #[validate(custom(function = "shared::validation::validate_queen_year"))]
    pub queen_year: i32,

    #[validate(range(min = 0, max = 100, message = "Frames count must be between 0 and 100"))]
    pub frames_count: i32,
}

/// Request payload for a partial hive update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateHiveRequest {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: Option<String>,

    pub status: Option<HiveStatus>,

    #[validate(custom(function = "shared::validation::validate_queen_year"))]
    pub queen_year: Option<i32>,

    #[validate(range(min = 0, max = 100, message = "Frames count must be between 0 and 100"))]
    pub frames_count: Option<i32>,
}

/// Row values for inserting a hive.
#[derive(Debug, Clone)]
pub struct NewHive {
    pub owner_id: i64,
    pub hive: CreateHiveRequest,
}

/// A hive with its inspections and aggregates over them.
///
/// Aggregates are `None` when the hive has no inspections.
#[derive(Debug, Clone, Serialize)]
pub struct HiveWithStats {
    #[serde(flatten)]
    pub hive: Hive,
    pub inspections: Vec<Inspection>,
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_weight: Option<f64>,
    pub last_inspection_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hive() -> Hive {
        Hive {
            id: 1,
            name: "Linden".to_string(),
            location: "North meadow".to_string(),
            description: None,
            status: HiveStatus::Active,
            queen_year: 2023,
            frames_count: 10,
            owner_id: 3,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_hive_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HiveStatus::Maintenance).unwrap(),
            "\"maintenance\""
        );
        let status: HiveStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(status, HiveStatus::Inactive);
    }

    #[test]
    fn test_hive_status_from_str() {
        for status in [
            HiveStatus::Active,
            HiveStatus::Inactive,
            HiveStatus::Maintenance,
        ] {
            assert_eq!(status.as_str().parse::<HiveStatus>().unwrap(), status);
        }
        let err = "swarming".parse::<HiveStatus>().unwrap_err();
        assert_eq!(err.value, "swarming");
        assert_eq!(HiveStatus::Active.to_string(), "active");
    }

    #[test]
    fn test_create_request_defaults_to_active() {
        let json = r#"{
            "name": "Linden",
            "location": "North meadow",
            "queen_year": 2023,
            "frames_count": 10
        }"#;
        let request: CreateHiveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, HiveStatus::Active);
        assert!(request.description.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_validation() {
        let json = r#"{
            "name": "  ",
            "location": "North meadow",
            "queen_year": 1700,
            "frames_count": 500
        }"#;
        let request: CreateHiveRequest = serde_json::from_str(json).unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("queen_year"));
        assert!(fields.contains_key("frames_count"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{
            "name": "Linden",
            "location": "North meadow",
            "status": "swarming",
            "queen_year": 2023,
            "frames_count": 10
        }"#;
        assert!(serde_json::from_str::<CreateHiveRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_partial() {
        let request: UpdateHiveRequest =
            serde_json::from_str(r#"{"frames_count": 12}"#).unwrap();
        assert_eq!(request.frames_count, Some(12));
        assert!(request.name.is_none());
        assert!(request.status.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_hive_with_stats_flattens_hive() {
        let stats = HiveWithStats {
            hive: sample_hive(),
            inspections: vec![],
            avg_temperature: Some(32.0),
            avg_humidity: None,
            avg_weight: None,
            last_inspection_date: None,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["name"], "Linden");
        assert_eq!(json["status"], "active");
        assert_eq!(json["owner_id"], 3);
        assert_eq!(json["avg_temperature"], 32.0);
        assert!(json["avg_humidity"].is_null());
        assert!(json["inspections"].as_array().unwrap().is_empty());
    }
}
