//! Database metrics collection.
//!
//! Every repository query is wrapped in a [`QueryTimer`] so its latency and
//! outcome land in the Prometheus registry installed by the binary.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Record database query duration.
pub fn record_query_duration(table: &'static str, query_name: &'static str, duration_secs: f64) {
    histogram!(
        "database_query_duration_seconds",
        "table" => table,
        "query" => query_name
    )
    .record(duration_secs);
}

/// Count a failed query.
pub fn record_query_error(table: &'static str, query_name: &'static str) {
    counter!(
        "database_query_errors_total",
        "table" => table,
        "query" => query_name
    )
    .increment(1);
}

/// Record database connection pool metrics.
///
/// Called from the readiness probe so pool health is sampled regularly.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one repository operation.
///
/// ```ignore
/// let timer = QueryTimer::new("hives", "get_hive_with_stats");
/// let result = run_queries().await;
/// timer.finish(result)
/// ```
pub struct QueryTimer {
    table: &'static str,
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(table: &'static str, query_name: &'static str) -> Self {
        Self {
            table,
            query_name,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time only.
    pub fn record(self) {
        record_query_duration(
            self.table,
            self.query_name,
            self.start.elapsed().as_secs_f64(),
        );
    }

    /// Records the elapsed time and counts an error outcome, then hands the
    /// result back.
    pub fn finish<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        if result.is_err() {
            record_query_error(self.table, self.query_name);
        }
        self.record();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_creation() {
        let timer = QueryTimer::new("hives", "get");
        assert_eq!(timer.table, "hives");
        assert_eq!(timer.query_name, "get");
    }

    #[test]
    fn test_finish_passes_result_through() {
        let ok: Result<i32, &str> = QueryTimer::new("hives", "ok_query").finish(Ok(3));
        assert_eq!(ok, Ok(3));

        let err: Result<i32, &str> = QueryTimer::new("hives", "failing_query").finish(Err("boom"));
        assert_eq!(err, Err("boom"));
    }
}
