//! Sensor repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::models::sensor::{NewSensor, UpdateSensorRequest};

use super::base::{settle, Repository};
use crate::entities::{SensorEntity, SensorStatsRow};
use crate::metrics::QueryTimer;

/// Repository for hive sensors and their reading summaries.
#[derive(Clone)]
pub struct SensorRepository {
    pool: PgPool,
}

impl SensorRepository {
    /// Creates a new SensorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists the sensors of a hive registered by `owner_id`.
    pub async fn get_sensors_by_hive(
        &self,
        hive_id: i64,
        owner_id: i64,
    ) -> Result<Vec<SensorEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_sensors_by_hive");
        let result = sqlx::query_as::<_, SensorEntity>(
            r#"
            SELECT * FROM sensors
            WHERE hive_id = $1 AND owner_id = $2
            ORDER BY id
            "#,
        )
        .bind(hive_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Summarizes a sensor's readings.
    ///
    /// `last_value` and `battery_level` are taken from the most recent
    /// measurement (latest `created_at`, highest id on ties). Returns `None`
    /// if the sensor does not exist or belongs to another user.
    pub async fn get_sensor_stats(
        &self,
        sensor_id: i64,
        owner_id: i64,
    ) -> Result<Option<SensorStatsRow>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_sensor_stats");
        let result = sqlx::query_as::<_, SensorStatsRow>(
            r#"
            SELECT
                s.id AS sensor_id,
                s.name AS sensor_name,
                s.sensor_type,
                latest.value AS last_value,
                agg.min_value,
                agg.max_value,
                agg.avg_value,
                latest.battery_level,
                latest.created_at AS last_measurement_time
            FROM sensors s
            LEFT JOIN LATERAL (
                SELECT
                    MIN(value) AS min_value,
                    MAX(value) AS max_value,
                    AVG(value) AS avg_value
                FROM measurements
                WHERE sensor_id = s.id
            ) agg ON TRUE
            LEFT JOIN LATERAL (
                SELECT value, battery_level, created_at
                FROM measurements
                WHERE sensor_id = s.id
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ) latest ON TRUE
            WHERE s.id = $1 AND s.owner_id = $2
            "#,
        )
        .bind(sensor_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}

#[async_trait]
impl Repository for SensorRepository {
    type Entity = SensorEntity;
    type Create = NewSensor;
    type Update = UpdateSensorRequest;

    const TABLE: &'static str = "sensors";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, new: NewSensor) -> Result<SensorEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let sensor = new.sensor;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, SensorEntity>(
            r#"
            INSERT INTO sensors (name, sensor_type, is_active, hive_id, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&sensor.name)
        .bind(&sensor.sensor_type)
        .bind(sensor.is_active)
        .bind(sensor.hive_id)
        .bind(new.owner_id)
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateSensorRequest,
    ) -> Result<Option<SensorEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, SensorEntity>(
            r#"
            UPDATE sensors SET
                name = COALESCE($2, name),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.is_active)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
