//! Measurement repository for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use domain::models::measurement::{CreateMeasurementRequest, MeasurementChanges};

use super::base::{settle, Repository};
use crate::entities::MeasurementEntity;
use crate::metrics::QueryTimer;

/// Repository for sensor readings.
#[derive(Clone)]
pub struct MeasurementRepository {
    pool: PgPool,
}

impl MeasurementRepository {
    /// Creates a new MeasurementRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a sensor's readings newest first, at most `limit` rows.
    ///
    /// `start` and `end` are inclusive bounds on `created_at`.
    pub async fn get_measurements_by_sensor(
        &self,
        sensor_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<MeasurementEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_measurements_by_sensor");
        let result = sqlx::query_as::<_, MeasurementEntity>(
            r#"
            SELECT * FROM measurements
            WHERE sensor_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4
            "#,
        )
        .bind(sensor_id)
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }
}

#[async_trait]
impl Repository for MeasurementRepository {
    type Entity = MeasurementEntity;
    type Create = CreateMeasurementRequest;
    type Update = MeasurementChanges;

    const TABLE: &'static str = "measurements";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(
        &self,
        measurement: CreateMeasurementRequest,
    ) -> Result<MeasurementEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, MeasurementEntity>(
            r#"
            INSERT INTO measurements (sensor_id, value, battery_level)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(measurement.sensor_id)
        .bind(measurement.value)
        .bind(measurement.battery_level)
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: MeasurementChanges,
    ) -> Result<Option<MeasurementEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, MeasurementEntity>(
            r#"
            UPDATE measurements SET
                value = COALESCE($2, value),
                battery_level = COALESCE($3, battery_level),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.value)
        .bind(changes.battery_level)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
