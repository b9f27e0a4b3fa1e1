//! Query and pool metrics for the SQLite store.

use metrics::{gauge, histogram};
use sqlx::SqlitePool;
use std::time::Instant;

pub const QUERY_DURATION_METRIC: &str = "database_query_duration_seconds";

/// Times one repository query, labelled by a static query name.
///
/// ```ignore
/// let timer = QueryTimer::new("find_board_by_id");
/// let result = sqlx::query_as::<_, BoardEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    pub fn query(&self) -> &'static str {
        self.query
    }

    /// Emits the elapsed time, whether or not the query succeeded.
    pub fn record(self) {
        histogram!(QUERY_DURATION_METRIC, "query" => self.query)
            .record(self.start.elapsed().as_secs_f64());
    }
}

/// Publishes pool occupancy gauges. The health check calls this on every probe.
pub fn record_pool_metrics(pool: &SqlitePool) {
    let size = pool.size();
    let idle = u32::try_from(pool.num_idle()).unwrap_or(u32::MAX).min(size);

    gauge!("database_connections_total").set(f64::from(size));
    gauge!("database_connections_idle").set(f64::from(idle));
    gauge!("database_connections_active").set(f64::from(size - idle));
}
