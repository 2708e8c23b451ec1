//! Token endpoint.

use axum::{extract::State, Form, Json};
use domain::models::user::{LoginForm, TokenResponse};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// Exchange username and password for a bearer token.
///
/// POST /api/v1/auth/token (form-encoded)
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.auth.login(&form.username, &form.password).await?;
    info!(username = %form.username, "Login succeeded");
    Ok(Json(TokenResponse::bearer(token)))
}
