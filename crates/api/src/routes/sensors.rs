//! Sensor endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::sensor::{CreateSensorRequest, NewSensor};
use domain::models::{Sensor, SensorStats};
use domain::services::visible_to;
use persistence::repositories::{Repository, SensorRepository};
use tracing::info;
use validator::Validate;

use super::inspections::own_hive;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Loads a sensor only if the caller owns it.
pub(crate) async fn own_sensor(
    state: &AppState,
    sensor_id: i64,
    caller: i64,
) -> Result<Sensor, ApiError> {
    let sensor = SensorRepository::new(state.pool.clone())
        .get(sensor_id)
        .await?
        .map(Sensor::from);
    visible_to(sensor, caller).ok_or_else(|| ApiError::NotFound("Sensor not found".to_string()))
}

/// POST /api/v1/sensors
pub async fn create_sensor(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateSensorRequest>,
) -> Result<(StatusCode, Json<Sensor>), ApiError> {
    request.validate()?;
    own_hive(&state, request.hive_id, user.id).await?;

    let sensor: Sensor = SensorRepository::new(state.pool.clone())
        .create(NewSensor {
            owner_id: user.id,
            sensor: request,
        })
        .await?
        .into();

    info!(sensor_id = sensor.id, hive_id = sensor.hive_id, "Sensor created");
    Ok((StatusCode::CREATED, Json(sensor)))
}

/// GET /api/v1/hives/:id/sensors
pub async fn list_hive_sensors(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(hive_id): Path<i64>,
) -> Result<Json<Vec<Sensor>>, ApiError> {
    let sensors = SensorRepository::new(state.pool.clone())
        .get_sensors_by_hive(hive_id, user.id)
        .await?;
    Ok(Json(sensors.into_iter().map(Sensor::from).collect()))
}

/// Reading aggregates of one of the caller's sensors.
///
/// GET /api/v1/sensors/:id/stats
pub async fn sensor_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(sensor_id): Path<i64>,
) -> Result<Json<SensorStats>, ApiError> {
    SensorRepository::new(state.pool.clone())
        .get_sensor_stats(sensor_id, user.id)
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| ApiError::NotFound("Sensor not found".to_string()))
}
