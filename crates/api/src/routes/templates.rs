//! Notification template endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::notification_template::CreateTemplateRequest;
use domain::models::NotificationTemplate;
use persistence::repositories::{NotificationTemplateRepository, Repository};
use shared::pagination::PageQuery;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, Superuser};

/// POST /api/v1/templates (superuser)
pub async fn create_template(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<NotificationTemplate>), ApiError> {
    request.validate()?;

    let template: NotificationTemplate = NotificationTemplateRepository::new(state.pool.clone())
        .create(request)
        .await?
        .into();

    info!(template_id = template.id, name = %template.name, "Template created");
    Ok((StatusCode::CREATED, Json(template)))
}

/// GET /api/v1/templates?skip=&limit=
pub async fn list_templates(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<NotificationTemplate>>, ApiError> {
    let templates = NotificationTemplateRepository::new(state.pool.clone())
        .get_all(page.into())
        .await?;
    Ok(Json(
        templates
            .into_iter()
            .map(NotificationTemplate::from)
            .collect(),
    ))
}

/// GET /api/v1/templates/by-name/:name
pub async fn get_template_by_name(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(name): Path<String>,
) -> Result<Json<NotificationTemplate>, ApiError> {
    NotificationTemplateRepository::new(state.pool.clone())
        .get_template_by_name(&name)
        .await?
        .map(|t| Json(t.into()))
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))
}
