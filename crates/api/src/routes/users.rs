//! User account endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::user::{RegisterUserRequest, UpdateUserRequest};
use domain::models::User;
use persistence::repositories::{Repository, UserRepository};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Register a new account.
///
/// POST /api/v1/users
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    request.validate()?;
    let user = state.auth.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// The authenticated caller.
///
/// GET /api/v1/users/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .get(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(user.into()))
}

/// Update an account. Callers may update themselves; superusers anyone.
///
/// PUT /api/v1/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    if caller.id != user_id && !caller.is_superuser {
        return Err(ApiError::Forbidden("Not enough permissions".to_string()));
    }
    request.validate()?;

    let user = state.auth.update_user(user_id, request).await?;
    Ok(Json(user))
}
