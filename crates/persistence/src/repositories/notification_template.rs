//! Notification template repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::models::notification_template::{CreateTemplateRequest, TemplateChanges};

use super::base::{settle, Repository};
use crate::entities::NotificationTemplateEntity;
use crate::metrics::QueryTimer;

/// Repository for notification templates.
#[derive(Clone)]
pub struct NotificationTemplateRepository {
    pool: PgPool,
}

impl NotificationTemplateRepository {
    /// Creates a new NotificationTemplateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks a template up by its unique name.
    pub async fn get_template_by_name(
        &self,
        name: &str,
    ) -> Result<Option<NotificationTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_template_by_name");
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(
            "SELECT * FROM notification_templates WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}

#[async_trait]
impl Repository for NotificationTemplateRepository {
    type Entity = NotificationTemplateEntity;
    type Create = CreateTemplateRequest;
    type Update = TemplateChanges;

    const TABLE: &'static str = "notification_templates";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(
        &self,
        template: CreateTemplateRequest,
    ) -> Result<NotificationTemplateEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(
            r#"
            INSERT INTO notification_templates (name, subject, body, notification_type)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&template.name)
        .bind(&template.subject)
        .bind(&template.body)
        .bind(template.notification_type.as_str())
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: TemplateChanges,
    ) -> Result<Option<NotificationTemplateEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, NotificationTemplateEntity>(
            r#"
            UPDATE notification_templates SET
                subject = COALESCE($2, subject),
                body = COALESCE($3, body),
                notification_type = COALESCE($4, notification_type),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.subject)
        .bind(changes.body)
        .bind(changes.notification_type.map(|t| t.as_str()))
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
