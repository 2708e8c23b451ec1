//! Inspection repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::models::inspection::{NewInspection, UpdateInspectionRequest};
use shared::pagination::Page;

use super::base::{settle, Repository};
use crate::entities::InspectionEntity;
use crate::metrics::QueryTimer;

/// Repository for hive inspections.
#[derive(Clone)]
pub struct InspectionRepository {
    pool: PgPool,
}

impl InspectionRepository {
    /// Creates a new InspectionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a hive's inspections recorded by `owner_id`, newest first.
    pub async fn get_inspections_by_hive(
        &self,
        hive_id: i64,
        owner_id: i64,
        page: Page,
    ) -> Result<Vec<InspectionEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_inspections_by_hive");
        let result = sqlx::query_as::<_, InspectionEntity>(
            r#"
            SELECT * FROM inspections
            WHERE hive_id = $1 AND owner_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(hive_id)
        .bind(owner_id)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }
}

#[async_trait]
impl Repository for InspectionRepository {
    type Entity = InspectionEntity;
    type Create = NewInspection;
    type Update = UpdateInspectionRequest;

    const TABLE: &'static str = "inspections";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, new: NewInspection) -> Result<InspectionEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let inspection = new.inspection;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, InspectionEntity>(
            r#"
            INSERT INTO inspections (hive_id, owner_id, temperature, humidity, weight, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(inspection.hive_id)
        .bind(new.owner_id)
        .bind(inspection.temperature)
        .bind(inspection.humidity)
        .bind(inspection.weight)
        .bind(&inspection.notes)
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateInspectionRequest,
    ) -> Result<Option<InspectionEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, InspectionEntity>(
            r#"
            UPDATE inspections SET
                temperature = COALESCE($2, temperature),
                humidity = COALESCE($3, humidity),
                weight = COALESCE($4, weight),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.temperature)
        .bind(changes.humidity)
        .bind(changes.weight)
        .bind(changes.notes)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
