//! Notification endpoint handlers.
//!
//! Pending/sent bookkeeping is superuser-only: it is the interface of the
//! external delivery worker.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::notification::{
    CreateNotificationRequest, MarkSentRequest, NewNotification, PendingQuery,
};
use domain::models::Notification;
use persistence::repositories::NotificationRepository;
use shared::pagination::PageQuery;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, Superuser};

/// Queue a notification for the caller. 404 for an unknown template.
///
/// POST /api/v1/notifications
pub async fn create_notification(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    request.validate()?;

    let notification: Notification = NotificationRepository::new(state.pool.clone())
        .create_notification(NewNotification {
            user_id: user.id,
            notification: request,
        })
        .await?
        .ok_or_else(|| ApiError::NotFound("Template not found".to_string()))?
        .into();

    info!(
        notification_id = notification.id,
        user_id = user.id,
        template_id = notification.template_id,
        "Notification queued"
    );
    Ok((StatusCode::CREATED, Json(notification)))
}

/// The caller's notifications, newest first.
///
/// GET /api/v1/notifications?skip=&limit=
pub async fn list_my_notifications(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let notifications = NotificationRepository::new(state.pool.clone())
        .get_user_notifications(user.id, page.into())
        .await?;
    Ok(Json(
        notifications.into_iter().map(Notification::from).collect(),
    ))
}

/// Unsent notifications, oldest first.
///
/// GET /api/v1/notifications/pending?limit= (superuser)
pub async fn list_pending(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
    Query(query): Query<PendingQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let pending = NotificationRepository::new(state.pool.clone())
        .get_pending_notifications(query.limit())
        .await?;
    Ok(Json(pending.into_iter().map(Notification::from).collect()))
}

/// Record a delivery attempt.
///
/// An empty body records a clean delivery. Any other body must be a valid
/// `{"error_message": ...}` object, otherwise the request is rejected and the
/// notification stays pending.
///
/// PUT /api/v1/notifications/:id/sent (superuser)
pub async fn mark_sent(
    State(state): State<AppState>,
    Superuser(_admin): Superuser,
    Path(notification_id): Path<i64>,
    body: Bytes,
) -> Result<Json<Notification>, ApiError> {
    let request = parse_mark_sent(&body)?;

    let notification: Notification = NotificationRepository::new(state.pool.clone())
        .mark_as_sent(notification_id, request.error_message)
        .await?
        .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?
        .into();

    match notification.error_message.as_deref() {
        Some(error) => warn!(notification_id = notification.id, error, "Notification delivery failed"),
        None => info!(notification_id = notification.id, "Notification sent"),
    }
    Ok(Json(notification))
}

fn parse_mark_sent(body: &[u8]) -> Result<MarkSentRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MarkSentRequest::default());
    }
    let Json(request) = Json::<MarkSentRequest>::from_bytes(body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    request.validate()?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_clean_delivery() {
        assert!(parse_mark_sent(b"").unwrap().error_message.is_none());
        assert!(parse_mark_sent(b"  \n").unwrap().error_message.is_none());
    }

    #[test]
    fn test_error_report_is_kept() {
        let request = parse_mark_sent(br#"{"error_message": "SMTP 421 try later"}"#).unwrap();
        assert_eq!(request.error_message.as_deref(), Some("SMTP 421 try later"));
    }

    #[test]
    fn test_unparseable_body_is_rejected() {
        let bodies: [&[u8]; 3] = [br#"{"error_message": 421}"#, b"{not json", b"[]"];
        for body in bodies {
            assert!(matches!(
                parse_mark_sent(body),
                Err(ApiError::BadRequest(_))
            ));
        }
    }
}
