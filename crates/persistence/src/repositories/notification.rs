//! Notification repository for database operations.
//!
//! Also serves as the delivery queue: an external sender polls
//! [`NotificationRepository::get_pending_notifications`] and reports each
//! outcome through [`NotificationRepository::mark_as_sent`].

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use domain::models::notification::{NewNotification, NotificationChanges};
use shared::pagination::Page;

use super::base::{settle, Repository};
use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

/// Repository for user notifications.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Queues a notification after checking its template exists.
    ///
    /// Returns `None` for an unknown template. Check and insert share one
    /// transaction.
    pub async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create_notification");
        let mut tx = self.pool.begin().await?;
        let result = Self::insert_with_template(&mut tx, new).await;
        timer.finish(settle(tx, result).await)
    }

    async fn insert_with_template(
        tx: &mut Transaction<'static, Postgres>,
        new: NewNotification,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let (template_exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM notification_templates WHERE id = $1)",
        )
        .bind(new.notification.template_id)
        .fetch_one(&mut **tx)
        .await?;

        if !template_exists {
            return Ok(None);
        }

        Self::insert(tx, new).await.map(Some)
    }

    async fn insert(
        tx: &mut Transaction<'static, Postgres>,
        new: NewNotification,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let notification = new.notification;
        sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, template_id, notification_type, priority,
                                       subject, body)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(notification.template_id)
        .bind(notification.notification_type.as_str())
        .bind(notification.priority.as_str())
        .bind(&notification.subject)
        .bind(&notification.body)
        .fetch_one(&mut **tx)
        .await
    }

    /// A user's notifications, newest first.
    pub async fn get_user_notifications(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_user_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Unsent notifications, oldest first, at most `limit`.
    pub async fn get_pending_notifications(
        &self,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_pending_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT * FROM notifications
            WHERE is_sent = FALSE
            ORDER BY created_at, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Flags a notification as sent and stamps `sent_at`.
    ///
    /// `error_message` is only written when one is given. `None` if no
    /// notification has this id.
    pub async fn mark_as_sent(
        &self,
        notification_id: i64,
        error_message: Option<String>,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "mark_as_sent");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            UPDATE notifications SET
                is_sent = TRUE,
                sent_at = NOW(),
                error_message = COALESCE($2, error_message),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(notification_id)
        .bind(error_message)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}

#[async_trait]
impl Repository for NotificationRepository {
    type Entity = NotificationEntity;
    type Create = NewNotification;
    type Update = NotificationChanges;

    const TABLE: &'static str = "notifications";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, new: NewNotification) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let mut tx = self.pool.begin().await?;
        let result = Self::insert(&mut tx, new).await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: NotificationChanges,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            UPDATE notifications SET
                priority = COALESCE($2, priority),
                subject = COALESCE($3, subject),
                body = COALESCE($4, body),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.priority.map(|p| p.as_str()))
        .bind(changes.subject)
        .bind(changes.body)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
