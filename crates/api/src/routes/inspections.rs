//! Inspection endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::inspection::{CreateInspectionRequest, NewInspection};
use domain::models::{Hive, Inspection};
use domain::services::visible_to;
use persistence::repositories::{HiveRepository, InspectionRepository, Repository};
use shared::pagination::PageQuery;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Loads a hive only if the caller owns it.
pub(crate) async fn own_hive(
    state: &AppState,
    hive_id: i64,
    caller: i64,
) -> Result<Hive, ApiError> {
    let hive = HiveRepository::new(state.pool.clone())
        .get(hive_id)
        .await?
        .map(Hive::from);
    visible_to(hive, caller).ok_or_else(|| ApiError::NotFound("Hive not found".to_string()))
}

/// POST /api/v1/inspections
pub async fn create_inspection(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateInspectionRequest>,
) -> Result<(StatusCode, Json<Inspection>), ApiError> {
    request.validate()?;
    own_hive(&state, request.hive_id, user.id).await?;

    let inspection: Inspection = InspectionRepository::new(state.pool.clone())
        .create(NewInspection {
            owner_id: user.id,
            inspection: request,
        })
        .await?
        .into();

    info!(
        inspection_id = inspection.id,
        hive_id = inspection.hive_id,
        "Inspection recorded"
    );
    Ok((StatusCode::CREATED, Json(inspection)))
}

/// Inspections of one of the caller's hives, newest first.
///
/// GET /api/v1/hives/:id/inspections?skip=&limit=
pub async fn list_hive_inspections(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(hive_id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Inspection>>, ApiError> {
    own_hive(&state, hive_id, user.id).await?;

    let inspections = InspectionRepository::new(state.pool.clone())
        .get_inspections_by_hive(hive_id, user.id, page.into())
        .await?;
    Ok(Json(inspections.into_iter().map(Inspection::from).collect()))
}
