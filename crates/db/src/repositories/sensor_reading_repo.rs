//! Repository for the append-only `sensor_readings` table.

use sqlx::PgPool;

use crate::models::sensor_reading::SensorReadingRow;

/// Column list for `sensor_readings` queries.
const COLUMNS: &str = "id, sensor_type, value, recorded_at";

/// Provides query operations for sensor readings.
pub struct SensorReadingRepo;

impl SensorReadingRepo {
    /// Append a reading. The database assigns `id` and `recorded_at`.
    pub async fn create(
        pool: &PgPool,
        sensor_type: &str,
        value: f64,
    ) -> Result<SensorReadingRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_readings (sensor_type, value) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorReadingRow>(&query)
            .bind(sensor_type)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// The most recent `limit` readings for a type, newest first.
    ///
    /// Ties on `recorded_at` (several inserts in one transaction tick) are
    /// broken by `id`.
    pub async fn list_recent(
        pool: &PgPool,
        sensor_type: &str,
        limit: i64,
    ) -> Result<Vec<SensorReadingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sensor_readings \
             WHERE sensor_type = $1 \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, SensorReadingRow>(&query)
            .bind(sensor_type)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
