//! Hive endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::hive::{CreateHiveRequest, NewHive, UpdateHiveRequest};
use domain::models::{Hive, HiveWithStats};
use domain::services::ensure_owner;
use persistence::repositories::{HiveRepository, Repository};
use shared::pagination::PageQuery;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// POST /api/v1/hives
pub async fn create_hive(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateHiveRequest>,
) -> Result<(StatusCode, Json<Hive>), ApiError> {
    request.validate()?;

    let hive: Hive = HiveRepository::new(state.pool.clone())
        .create(NewHive {
            owner_id: user.id,
            hive: request,
        })
        .await?
        .into();

    info!(hive_id = hive.id, owner_id = user.id, "Hive created");
    Ok((StatusCode::CREATED, Json(hive)))
}

/// The caller's hives, by id.
///
/// GET /api/v1/hives?skip=&limit=
pub async fn list_hives(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Hive>>, ApiError> {
    let hives = HiveRepository::new(state.pool.clone())
        .get_hives_by_user(user.id, page.into())
        .await?;
    Ok(Json(hives.into_iter().map(Hive::from).collect()))
}

/// A hive with its inspections and aggregates. Foreign hives are 404.
///
/// GET /api/v1/hives/:id
pub async fn get_hive(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(hive_id): Path<i64>,
) -> Result<Json<HiveWithStats>, ApiError> {
    HiveRepository::new(state.pool.clone())
        .get_hive_with_stats(hive_id, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Hive not found".to_string()))
}

/// Partial update. 404 when absent, 403 when owned by someone else.
///
/// PUT /api/v1/hives/:id
pub async fn update_hive(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(hive_id): Path<i64>,
    Json(request): Json<UpdateHiveRequest>,
) -> Result<Json<Hive>, ApiError> {
    let repo = HiveRepository::new(state.pool.clone());
    ensure_owner(repo.get(hive_id).await?.map(Hive::from), user.id, "Hive")?;
    request.validate()?;

    let hive: Hive = repo
        .update(hive_id, request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hive not found".to_string()))?
        .into();

    info!(hive_id = hive.id, "Hive updated");
    Ok(Json(hive))
}
