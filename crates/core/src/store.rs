//! The persistent store seam used by the cache, the synthesis engine and
//! the update path.
//!
//! The PostgreSQL implementation lives in the `db` crate; tests use an
//! in-memory one.

use async_trait::async_trait;

use crate::reading::SensorReading;
use crate::threshold::Threshold;

/// Any failure reaching or querying the persistent store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (connection refused, pool exhausted, ...).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but rejected or failed the query.
    #[error("Store query failed: {0}")]
    Query(String),
}

/// Operations the core needs from the relational store.
///
/// Implementations handle their own pooling, timeouts and retries and must
/// be safe to share across tasks.
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// All configured thresholds, ordered by sensor type.
    async fn select_thresholds(&self) -> Result<Vec<Threshold>, StoreError>;

    /// Insert or replace the threshold for `sensor_type`, refreshing its
    /// update timestamp. Returns the row as stored.
    async fn upsert_threshold(
        &self,
        sensor_type: &str,
        min_value: f64,
        max_value: f64,
    ) -> Result<Threshold, StoreError>;

    /// Append a reading; the store assigns id and timestamp.
    async fn insert_reading(&self, sensor_type: &str, value: f64) -> Result<(), StoreError>;

    /// The most recent `limit` readings for `sensor_type`, newest first.
    async fn select_recent_readings(
        &self,
        sensor_type: &str,
        limit: i64,
    ) -> Result<Vec<SensorReading>, StoreError>;
}
