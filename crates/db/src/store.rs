//! PostgreSQL implementation of the core [`SensorStore`] trait.

use async_trait::async_trait;
use sensorhub_core::reading::SensorReading;
use sensorhub_core::store::{SensorStore, StoreError};
use sensorhub_core::threshold::Threshold;

use crate::repositories::{SensorReadingRepo, ThresholdRepo};
use crate::DbPool;

/// Store adapter backed by the shared connection pool.
///
/// Cheap to clone; the pool handles concurrency and connection reuse.
#[derive(Clone)]
pub struct PgSensorStore {
    pool: DbPool,
}

impl PgSensorStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SensorStore for PgSensorStore {
    async fn select_thresholds(&self) -> Result<Vec<Threshold>, StoreError> {
        let rows = ThresholdRepo::list_all(&self.pool)
            .await
            .map_err(to_store_error)?;
        Ok(rows.into_iter().map(Threshold::from).collect())
    }

    async fn upsert_threshold(
        &self,
        sensor_type: &str,
        min_value: f64,
        max_value: f64,
    ) -> Result<Threshold, StoreError> {
        let row = ThresholdRepo::upsert(&self.pool, sensor_type, min_value, max_value)
            .await
            .map_err(to_store_error)?;
        Ok(Threshold::from(row))
    }

    async fn insert_reading(&self, sensor_type: &str, value: f64) -> Result<(), StoreError> {
        SensorReadingRepo::create(&self.pool, sensor_type, value)
            .await
            .map_err(to_store_error)?;
        Ok(())
    }

    async fn select_recent_readings(
        &self,
        sensor_type: &str,
        limit: i64,
    ) -> Result<Vec<SensorReading>, StoreError> {
        let rows = SensorReadingRepo::list_recent(&self.pool, sensor_type, limit)
            .await
            .map_err(to_store_error)?;
        Ok(rows.into_iter().map(SensorReading::from).collect())
    }
}

/// Classify a sqlx error as a connectivity or a query failure.
pub fn to_store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}
