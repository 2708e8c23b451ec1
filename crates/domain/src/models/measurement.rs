//! Sensor measurement domain model.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Upper bound on measurements returned by one listing.
pub const MAX_MEASUREMENTS: i64 = 1000;

/// Default number of measurements returned by one listing.
pub const DEFAULT_MEASUREMENTS: i64 = 100;

/// One reading reported by a sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    pub sensor_id: i64,
    pub value: f64,
    pub battery_level: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for recording a measurement.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMeasurementRequest {
    pub sensor_id: i64,

    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub value: f64,

    #[validate(custom(function = "shared::validation::validate_battery_level"))]
    pub battery_level: f64,
}

/// Column changes for a measurement.
#[derive(Debug, Clone, Default)]
pub struct MeasurementChanges {
    pub value: Option<f64>,
    pub battery_level: Option<f64>,
}

/// Query parameters for listing a sensor's measurements.
///
/// Both bounds are inclusive. Timestamps without an offset are read as UTC.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementQuery {
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

/// Parses an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` one as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|raw| {
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    })
    .transpose()
}

impl MeasurementQuery {
    /// Effective row cap, clamped to `0..=MAX_MEASUREMENTS`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_MEASUREMENTS)
            .clamp(0, MAX_MEASUREMENTS)
    }
}
