//! Alert repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::models::alert::{NewAlert, UpdateAlertRequest};

use super::base::{settle, Repository};
use crate::entities::AlertEntity;
use crate::metrics::QueryTimer;

/// Repository for monitoring alerts.
#[derive(Clone)]
pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    /// Creates a new AlertRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Unresolved alerts of `owner_id`, newest first, optionally for one hive.
    pub async fn get_active_alerts(
        &self,
        owner_id: i64,
        hive_id: Option<i64>,
    ) -> Result<Vec<AlertEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_active_alerts");
        let result = sqlx::query_as::<_, AlertEntity>(
            r#"
            SELECT * FROM alerts
            WHERE owner_id = $1
              AND is_resolved = FALSE
              AND ($2::bigint IS NULL OR hive_id = $2)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .bind(hive_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Marks an alert resolved. `None` if it is missing or not owned.
    pub async fn resolve_alert(
        &self,
        alert_id: i64,
        owner_id: i64,
    ) -> Result<Option<AlertEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "resolve_alert");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, AlertEntity>(
            r#"
            UPDATE alerts SET
                is_resolved = TRUE,
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(alert_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}

#[async_trait]
impl Repository for AlertRepository {
    type Entity = AlertEntity;
    type Create = NewAlert;
    type Update = UpdateAlertRequest;

    const TABLE: &'static str = "alerts";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, new: NewAlert) -> Result<AlertEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let alert = new.alert;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, AlertEntity>(
            r#"
            INSERT INTO alerts (alert_type, message, is_resolved, sensor_id, hive_id, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&alert.alert_type)
        .bind(&alert.message)
        .bind(alert.is_resolved)
        .bind(alert.sensor_id)
        .bind(alert.hive_id)
        .bind(new.owner_id)
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateAlertRequest,
    ) -> Result<Option<AlertEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, AlertEntity>(
            r#"
            UPDATE alerts SET
                is_resolved = COALESCE($2, is_resolved),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.is_resolved)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
