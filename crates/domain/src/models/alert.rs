//! Monitoring alert domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An alert raised for a hive by one of its sensors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
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

/// Request payload for raising an alert.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAlertRequest {
    #[validate(
        length(min = 1, max = 50, message = "Alert type must be 1-50 characters"),
        custom(function = "shared::validation::validate_not_blank")
    )]
    pub alert_type: String,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,

    pub sensor_id: i64,
    pub hive_id: i64,

    #[serde(default)]
    pub is_resolved: bool,
}

/// Row values for inserting an alert.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub owner_id: i64,
    pub alert: CreateAlertRequest,
}

/// Request payload for updating an alert.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAlertRequest {
    pub is_resolved: Option<bool>,
}

/// Query parameters for listing active alerts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertQuery {
    pub hive_id: Option<i64>,
}
