//! Alert endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::alert::{AlertQuery, CreateAlertRequest, NewAlert};
use domain::models::Alert;
use persistence::repositories::{AlertRepository, Repository};
use tracing::info;
use validator::Validate;

use super::inspections::own_hive;
use super::sensors::own_sensor;
use crate::app::AppState;
use crate::error::{ApiError, ValidationDetail};
use crate::extractors::CurrentUser;

/// Raise an alert against one of the caller's sensors and hives.
///
/// The hive must be the one the sensor is mounted in.
///
/// POST /api/v1/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<Alert>), ApiError> {
    request.validate()?;
    let sensor = own_sensor(&state, request.sensor_id, user.id).await?;
    if sensor.hive_id != request.hive_id {
        return Err(ApiError::Validation {
            message: "Sensor does not belong to this hive".to_string(),
            details: vec![ValidationDetail {
                field: "hive_id".to_string(),
                message: "Sensor does not belong to this hive".to_string(),
            }],
        });
    }
    own_hive(&state, request.hive_id, user.id).await?;

    let alert: Alert = AlertRepository::new(state.pool.clone())
        .create(NewAlert {
            owner_id: user.id,
            alert: request,
        })
        .await?
        .into();

    info!(
        alert_id = alert.id,
        alert_type = %alert.alert_type,
        hive_id = alert.hive_id,
        "Alert raised"
    );
    Ok((StatusCode::CREATED, Json(alert)))
}

/// The caller's unresolved alerts, newest first.
///
/// GET /api/v1/alerts?hive_id=
pub async fn list_active_alerts(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<AlertQuery>,
) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = AlertRepository::new(state.pool.clone())
        .get_active_alerts(user.id, query.hive_id)
        .await?;
    Ok(Json(alerts.into_iter().map(Alert::from).collect()))
}

/// PUT /api/v1/alerts/:id/resolve
pub async fn resolve_alert(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(alert_id): Path<i64>,
) -> Result<Json<Alert>, ApiError> {
    let alert: Alert = AlertRepository::new(state.pool.clone())
        .resolve_alert(alert_id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Alert not found".to_string()))?
        .into();

    info!(alert_id = alert.id, "Alert resolved");
    Ok(Json(alert))
}
