//! Notification settings endpoint handlers. One settings row per user.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::notification_settings::{
    CreateSettingsRequest, NewSettings, UpdateSettingsRequest,
};
use domain::models::NotificationSettings;
use persistence::repositories::NotificationSettingsRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

fn settings_not_found() -> ApiError {
    ApiError::NotFound("Settings not found".to_string())
}

/// GET /api/v1/settings/me
pub async fn get_my_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<NotificationSettings>, ApiError> {
    NotificationSettingsRepository::new(state.pool.clone())
        .get_user_settings(user.id)
        .await?
        .map(|s| Json(s.into()))
        .ok_or_else(settings_not_found)
}

/// Create the caller's settings. 400 when they already exist.
///
/// POST /api/v1/settings
pub async fn create_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateSettingsRequest>,
) -> Result<(StatusCode, Json<NotificationSettings>), ApiError> {
    request.validate()?;

    let settings: NotificationSettings = NotificationSettingsRepository::new(state.pool.clone())
        .create_settings(NewSettings {
            user_id: user.id,
            settings: request,
        })
        .await?
        .ok_or_else(|| ApiError::BadRequest("Settings already exist".to_string()))?
        .into();

    info!(user_id = user.id, "Notification settings created");
    Ok((StatusCode::CREATED, Json(settings)))
}

/// PUT /api/v1/settings/me
pub async fn update_my_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<NotificationSettings>, ApiError> {
    request.validate()?;

    let settings: NotificationSettings = NotificationSettingsRepository::new(state.pool.clone())
        .update_settings(user.id, request)
        .await?
        .ok_or_else(settings_not_found)?
        .into();

    info!(user_id = user.id, "Notification settings updated");
    Ok(Json(settings))
}
