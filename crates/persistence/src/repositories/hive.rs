//! Hive repository for database operations.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use domain::models::hive::{NewHive, UpdateHiveRequest};
use domain::models::HiveWithStats;
use shared::pagination::Page;

use super::base::{settle, Repository};
use crate::entities::{HiveEntity, HiveStatsRow, InspectionEntity};
use crate::metrics::QueryTimer;

/// Repository for hives and their inspection aggregates.
#[derive(Clone)]
pub struct HiveRepository {
    pool: PgPool,
}

impl HiveRepository {
    /// Creates a new HiveRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists a user's hives ordered by id.
    pub async fn get_hives_by_user(
        &self,
        owner_id: i64,
        page: Page,
    ) -> Result<Vec<HiveEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_hives_by_user");
        let result = sqlx::query_as::<_, HiveEntity>(
            r#"
            SELECT * FROM hives
            WHERE owner_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(page.limit())
        .bind(page.skip())
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Loads a hive with its inspections (newest first) and averages over them.
    ///
    /// All reads share one `REPEATABLE READ` snapshot, so the averages always
    /// describe exactly the returned inspections. Returns `None` if the hive
    /// does not exist or belongs to another user.
    pub async fn get_hive_with_stats(
        &self,
        hive_id: i64,
        owner_id: i64,
    ) -> Result<Option<HiveWithStats>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_hive_with_stats");
        let mut tx = self.pool.begin().await?;
        let result = Self::load_hive_with_stats(&mut tx, hive_id, owner_id).await;
        timer.finish(settle(tx, result).await)
    }

    async fn load_hive_with_stats(
        tx: &mut Transaction<'static, Postgres>,
        hive_id: i64,
        owner_id: i64,
    ) -> Result<Option<HiveWithStats>, sqlx::Error> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut **tx)
            .await?;

        let hive = sqlx::query_as::<_, HiveEntity>(
            "SELECT * FROM hives WHERE id = $1 AND owner_id = $2",
        )
        .bind(hive_id)
        .bind(owner_id)
        .fetch_optional(&mut **tx)
        .await?;

        let Some(hive) = hive else {
            return Ok(None);
        };

        let inspections = sqlx::query_as::<_, InspectionEntity>(
            r#"
            SELECT * FROM inspections
            WHERE hive_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(hive_id)
        .fetch_all(&mut **tx)
        .await?;

        let stats = sqlx::query_as::<_, HiveStatsRow>(
            r#"
            SELECT
                AVG(temperature) AS avg_temperature,
                AVG(humidity) AS avg_humidity,
                AVG(weight) AS avg_weight,
                MAX(created_at) AS last_inspection_date
            FROM inspections
            WHERE hive_id = $1
            "#,
        )
        .bind(hive_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(Some(HiveWithStats {
            hive: hive.into(),
            inspections: inspections.into_iter().map(Into::into).collect(),
            avg_temperature: stats.avg_temperature,
            avg_humidity: stats.avg_humidity,
            avg_weight: stats.avg_weight,
            last_inspection_date: stats.last_inspection_date,
        }))
    }
}

#[async_trait]
impl Repository for HiveRepository {
    type Entity = HiveEntity;
    type Create = NewHive;
    type Update = UpdateHiveRequest;

    const TABLE: &'static str = "hives";

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn create(&self, new: NewHive) -> Result<HiveEntity, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "create");
        let hive = new.hive;
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, HiveEntity>(
            r#"
            INSERT INTO hives (name, location, description, status, queen_year,
                               frames_count, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&hive.name)
        .bind(&hive.location)
        .bind(&hive.description)
        .bind(hive.status.as_str())
        .bind(hive.queen_year)
        .bind(hive.frames_count)
        .bind(new.owner_id)
        .fetch_one(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }

    async fn update(
        &self,
        id: i64,
        changes: UpdateHiveRequest,
    ) -> Result<Option<HiveEntity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "update");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_as::<_, HiveEntity>(
            r#"
            UPDATE hives SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                status = COALESCE($5, status),
                queen_year = COALESCE($6, queen_year),
                frames_count = COALESCE($7, frames_count),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.location)
        .bind(changes.description)
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.queen_year)
        .bind(changes.frames_count)
        .fetch_optional(&mut *tx)
        .await;
        timer.finish(settle(tx, result).await)
    }
}
