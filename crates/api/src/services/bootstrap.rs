//! First superuser creation on startup.

use domain::models::user::NewUser;
use persistence::repositories::{Repository, UserRepository};
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::AdminConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Outcome of a bootstrap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    NotConfigured,
    AlreadyPresent,
    Created(i64),
}

/// Creates the configured superuser unless one already exists.
///
/// Runs after migrations. Idempotent.
pub async fn bootstrap_admin(
    pool: &PgPool,
    config: &AdminConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    let (Some(username), Some(email), Some(password)) = (
        non_empty(&config.bootstrap_username),
        non_empty(&config.bootstrap_email),
        non_empty(&config.bootstrap_password),
    ) else {
        if config.bootstrap_username.is_some()
            || config.bootstrap_email.is_some()
            || config.bootstrap_password.is_some()
        {
            warn!("Admin bootstrap is partially configured, skipping");
        }
        return Ok(BootstrapOutcome::NotConfigured);
    };

    let users = UserRepository::new(pool.clone());
    if users.superuser_exists().await? {
        info!("Superuser already exists, skipping bootstrap");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let user = users
        .create(NewUser {
            email: email.to_string(),
            username: username.to_string(),
            hashed_password: hash_password(password)?,
            is_active: true,
            is_superuser: true,
        })
        .await?;

    info!(user_id = user.id, username = %user.username, "Bootstrap superuser created");
    warn!("Remove APIARY__ADMIN__BOOTSTRAP_PASSWORD from the environment now that the superuser exists");

    Ok(BootstrapOutcome::Created(user.id))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
