//! User repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::models::user::{NewUser, UserChanges};

use super::base::{settle, Repository};
use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "find_by_email");
        let result = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await;
        timer.finish(result)
    }

    /// Find a user by username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "find_by_username");
        let result = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await;
        timer.finish(result)
    }

    /// Whether any superuser account exists.
    pub async fn superuser_exists(&self) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "superuser_exists");
        let result: Result<(bool,), sqlx::Error> =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE is_superuser = TRUE)")
                .fetch_one(&self.pool)
                .await;
        timer.finish(result).map(|(exists,)| exists)
    }
}

#[async_trait]
impl Repository for UserRepository {
    type Entity = UserEntity;
    type Create = NewUser;
    type Update = UserChanges;

    const TABLE: &'static str = "users";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, user: NewUser) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (email, username, hashed_password, is_active, is_superuser)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.hashed_password)
        .bind(user.is_active)
        .bind(user.is_superuser)
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: UserChanges,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                username = COALESCE($3, username),
                hashed_password = COALESCE($4, hashed_password),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.email)
        .bind(changes.username)
        .bind(changes.hashed_password)
        .bind(changes.is_active)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
