//! Authentication service.
//!
//! Registration, credential checks and bearer-token resolution. Tokens are
//! stateless: the subject is the username, looked up again on every request.

use std::sync::Arc;

use domain::models::user::{NewUser, RegisterUserRequest, UpdateUserRequest, UserChanges};
use domain::models::User;
use persistence::repositories::{Repository, UserRepository};
use shared::jwt::{JwtError, TokenConfig};
use shared::password::{hash_password, verify_password, PasswordError};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::ApiError;

/// Authentication service errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailTaken | AuthError::UsernameTaken => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::InactiveUser => ApiError::BadRequest(err.to_string()),
            AuthError::UserNotFound => ApiError::NotFound(err.to_string()),
            AuthError::Database(db_err) => ApiError::from(db_err),
            AuthError::Token(e) => ApiError::Internal(format!("Token error: {}", e)),
            AuthError::Password(e) => ApiError::Internal(format!("Password error: {}", e)),
        }
    }
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: Arc<TokenConfig>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenConfig>) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Registers a regular (non-superuser) account.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, AuthError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }
        if self.users.find_by_username(&request.username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let hashed_password = hash_password(&request.password)?;
        let user = self
            .users
            .create(NewUser {
                email: request.email,
                username: request.username,
                hashed_password,
                is_active: true,
                is_superuser: false,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user.into())
    }

    /// Checks a username/password pair.
    ///
    /// Unknown users, wrong passwords and unreadable stored hashes all
    /// report [`AuthError::InvalidCredentials`].
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        match verify_password(password, &user.hashed_password) {
            Ok(true) => Ok(user.into()),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                debug!(user_id = user.id, error = %e, "Stored password hash rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Authenticates and issues an access token for the user.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let user = self.authenticate(username, password).await?;
        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        let token = self.tokens.issue_access_token(&user.username)?;
        info!(user_id = user.id, "Access token issued");
        Ok(token)
    }

    /// Resolves the user a bearer token was issued to.
    ///
    /// Any verification failure, or a subject that no longer exists, is
    /// [`AuthError::Unauthenticated`].
    pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.tokens.verify_token(token).map_err(|e| {
            debug!(error = %e, "Bearer token rejected");
            AuthError::Unauthenticated
        })?;

        self.users
            .find_by_username(&claims.sub)
            .await?
            .map(User::from)
            .ok_or(AuthError::Unauthenticated)
    }

    /// Applies a partial update to an account. A new password is re-hashed.
    pub async fn update_user(
        &self,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> Result<User, AuthError> {
        let hashed_password = request
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;

        let changes = UserChanges {
            email: request.email,
            username: request.username,
            hashed_password,
            is_active: request.is_active,
        };

        let user = self
            .users
            .update(user_id, changes)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        info!(user_id = user.id, "User updated");
        Ok(user.into())
    }
}
