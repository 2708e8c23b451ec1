//! Notification settings repository for database operations.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use domain::models::notification_settings::{NewSettings, UpdateSettingsRequest};

use super::base::{settle, Repository};
use crate::entities::NotificationSettingsEntity;
use crate::metrics::QueryTimer;

/// Repository for per-user notification settings. One row per user.
#[derive(Clone)]
pub struct NotificationSettingsRepository {
    pool: PgPool,
}

impl NotificationSettingsRepository {
    /// Creates a new NotificationSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches the settings row of a user.
    pub async fn get_user_settings(
        &self,
        user_id: i64,
    ) -> Result<Option<NotificationSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_user_settings");
        let result = sqlx::query_as::<_, NotificationSettingsEntity>(
            "SELECT * FROM notification_settings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Creates a user's settings unless they already have a row.
    ///
    /// Returns `None` when settings exist. A concurrent insert that slips
    /// past the check fails on the `user_id` unique constraint instead.
    pub async fn create_settings(
        &self,
        new: NewSettings,
    ) -> Result<Option<NotificationSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create_settings");
        let mut tx = self.pool.begin().await?;
        let result = Self::insert_if_absent(&mut tx, new).await;
        timer.finish(settle(tx, result).await)
    }

    async fn insert_if_absent(
        tx: &mut Transaction<'static, Postgres>,
        new: NewSettings,
    ) -> Result<Option<NotificationSettingsEntity>, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM notification_settings WHERE user_id = $1)",
        )
        .bind(new.user_id)
        .fetch_one(&mut **tx)
        .await?;

        if exists {
            return Ok(None);
        }

        Self::insert(tx, new).await.map(Some)
    }

    async fn insert(
        tx: &mut Transaction<'static, Postgres>,
        new: NewSettings,
    ) -> Result<NotificationSettingsEntity, sqlx::Error> {
        let settings = new.settings;
        sqlx::query_as::<_, NotificationSettingsEntity>(
            r#"
            INSERT INTO notification_settings (user_id, email_enabled, sms_enabled,
                                               push_enabled, email_address, phone_number,
                                               min_priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(settings.email_enabled)
        .bind(settings.sms_enabled)
        .bind(settings.push_enabled)
        .bind(&settings.email_address)
        .bind(&settings.phone_number)
        .bind(settings.min_priority.as_str())
        .fetch_one(&mut **tx)
        .await
    }

    /// Updates the settings of a user. `None` if the user has none yet.
    pub async fn update_settings(
        &self,
        user_id: i64,
        changes: UpdateSettingsRequest,
    ) -> Result<Option<NotificationSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update_settings");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, NotificationSettingsEntity>(
            r#"
            UPDATE notification_settings SET
                email_enabled = COALESCE($2, email_enabled),
                sms_enabled = COALESCE($3, sms_enabled),
                push_enabled = COALESCE($4, push_enabled),
                email_address = COALESCE($5, email_address),
                phone_number = COALESCE($6, phone_number),
                min_priority = COALESCE($7, min_priority),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(changes.email_enabled)
        .bind(changes.sms_enabled)
        .bind(changes.push_enabled)
        .bind(changes.email_address)
        .bind(changes.phone_number)
        .bind(changes.min_priority.map(|p| p.as_str()))
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}

#[async_trait]
impl Repository for NotificationSettingsRepository {
    type Entity = NotificationSettingsEntity;
    type Create = NewSettings;
    type Update = UpdateSettingsRequest;

    const TABLE: &'static str = "notification_settings";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, new: NewSettings) -> Result<NotificationSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let mut tx = self.pool.begin().await?;
        let result = Self::insert(&mut tx, new).await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateSettingsRequest,
    ) -> Result<Option<NotificationSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, NotificationSettingsEntity>(
            r#"
            UPDATE notification_settings SET
                email_enabled = COALESCE($2, email_enabled),
                sms_enabled = COALESCE($3, sms_enabled),
                push_enabled = COALESCE($4, push_enabled),
                email_address = COALESCE($5, email_address),
                phone_number = COALESCE($6, phone_number),
                min_priority = COALESCE($7, min_priority),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.email_enabled)
        .bind(changes.sms_enabled)
        .bind(changes.push_enabled)
        .bind(changes.email_address)
        .bind(changes.phone_number)
        .bind(changes.min_priority.map(|p| p.as_str()))
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
