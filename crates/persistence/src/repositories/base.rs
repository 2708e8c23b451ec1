//! Generic entity repository.
//!
//! Each table gets one repository implementing [`Repository`]. Reads by id,
//! paging and deletion are shared defaults driven by [`Repository::TABLE`];
//! inserts and partial updates are written per entity because their column
//! lists differ.
//!
//! Every mutating call runs in its own transaction. On failure the
//! transaction is rolled back before the error is returned.

use async_trait::async_trait;
use shared::pagination::Page;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use crate::metrics::QueryTimer;

/// Uniform CRUD over one table.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Row type returned by every operation.
    type Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin;
    /// Field values for an insert.
    type Create: Send + 'static;
    /// Partial field set for an update; `None` fields are left untouched.
    type Update: Send + 'static;

    /// Table name. Must be a trusted identifier, it is spliced into SQL.
    const TABLE: &'static str;

    fn pool(&self) -> &PgPool;

    /// Inserts a row and returns it with generated columns populated.
    async fn create(&self, fields: Self::Create) -> Result<Self::Entity, sqlx::Error>;

    /// Applies a partial update. `None` when no row has this id.
    async fn update(
        &self,
        id: i64,
        fields: Self::Update,
    ) -> Result<Option<Self::Entity>, sqlx::Error>;

    /// Fetches one row by id.
    async fn get(&self, id: i64) -> Result<Option<Self::Entity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get");
        let sql = format!("SELECT * FROM {} WHERE id = $1", Self::TABLE);
        let result = sqlx::query_as::<_, Self::Entity>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await;
        timer.finish(result)
    }

    /// Fetches a page of rows ordered by id.
    async fn get_all(&self, page: Page) -> Result<Vec<Self::Entity>, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "get_all");
        let sql = format!(
            "SELECT * FROM {} ORDER BY id LIMIT $1 OFFSET $2",
            Self::TABLE
        );
        let result = sqlx::query_as::<_, Self::Entity>(&sql)
            .bind(page.limit())
            .bind(page.skip())
            .fetch_all(self.pool())
            .await;
        timer.finish(result)
    }

    /// Deletes a row. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new(Self::TABLE, "delete");
        let sql = format!("DELETE FROM {} WHERE id = $1", Self::TABLE);

        let mut tx = self.pool().begin().await?;
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map(|done| done.rows_affected() > 0);
        timer.finish(settle(tx, result).await)
    }
}

/// Commits `tx` when `result` is `Ok`, otherwise rolls it back and returns
/// the original error.
pub(crate) async fn settle<T>(
    tx: Transaction<'static, Postgres>,
    result: Result<T, sqlx::Error>,
) -> Result<T, sqlx::Error> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(err)
        }
    }
}
