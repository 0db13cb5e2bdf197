//! Repository for the `thresholds` table.

use sqlx::PgPool;

use crate::models::threshold::ThresholdRow;

/// Column list for `thresholds` queries.
const COLUMNS: &str = "id, sensor_type, min_value, max_value, created_at, updated_at";

/// Provides query operations for sensor thresholds.
pub struct ThresholdRepo;

impl ThresholdRepo {
    /// List all thresholds ordered by sensor type.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ThresholdRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM thresholds ORDER BY sensor_type");
        sqlx::query_as::<_, ThresholdRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find the threshold for a single sensor type.
    pub async fn find_by_type(
        pool: &PgPool,
        sensor_type: &str,
    ) -> Result<Option<ThresholdRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM thresholds WHERE sensor_type = $1");
        sqlx::query_as::<_, ThresholdRow>(&query)
            .bind(sensor_type)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the threshold for `sensor_type`.
    ///
    /// An existing row keeps its `created_at`; `updated_at` is refreshed.
    pub async fn upsert(
        pool: &PgPool,
        sensor_type: &str,
        min_value: f64,
        max_value: f64,
    ) -> Result<ThresholdRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO thresholds (sensor_type, min_value, max_value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (sensor_type) \
             DO UPDATE SET \
                min_value = EXCLUDED.min_value, \
                max_value = EXCLUDED.max_value, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ThresholdRow>(&query)
            .bind(sensor_type)
            .bind(min_value)
            .bind(max_value)
            .fetch_one(pool)
            .await
    }

    /// Insert a threshold only if the type has none yet.
    ///
    /// Returns `true` when a row was inserted.
    pub async fn insert_if_absent(
        pool: &PgPool,
        sensor_type: &str,
        min_value: f64,
        max_value: f64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO thresholds (sensor_type, min_value, max_value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (sensor_type) DO NOTHING",
        )
        .bind(sensor_type)
        .bind(min_value)
        .bind(max_value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
