//! Measurement endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::measurement::{CreateMeasurementRequest, MeasurementQuery};
use domain::models::Measurement;
use persistence::repositories::{MeasurementRepository, Repository};
use tracing::debug;
use validator::Validate;

use super::sensors::own_sensor;
use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// POST /api/v1/measurements
pub async fn create_measurement(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateMeasurementRequest>,
) -> Result<(StatusCode, Json<Measurement>), ApiError> {
    request.validate()?;
    own_sensor(&state, request.sensor_id, user.id).await?;

    let measurement: Measurement = MeasurementRepository::new(state.pool.clone())
        .create(request)
        .await?
        .into();

    debug!(
        measurement_id = measurement.id,
        sensor_id = measurement.sensor_id,
        "Measurement stored"
    );
    Ok((StatusCode::CREATED, Json(measurement)))
}

/// Readings of one of the caller's sensors, newest first, bounds inclusive.
/// Bounds are RFC 3339 timestamps; ones without an offset are read as UTC.
///
/// GET /api/v1/sensors/:id/measurements?start_date=&end_date=&limit=
pub async fn list_sensor_measurements(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(sensor_id): Path<i64>,
    Query(query): Query<MeasurementQuery>,
) -> Result<Json<Vec<Measurement>>, ApiError> {
    own_sensor(&state, sensor_id, user.id).await?;

    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Err(ApiError::validation("start_date must not be after end_date"));
        }
    }

    let measurements = MeasurementRepository::new(state.pool.clone())
        .get_measurements_by_sensor(sensor_id, query.start_date, query.end_date, query.limit())
        .await?;
    Ok(Json(measurements.into_iter().map(Measurement::from).collect()))
}
