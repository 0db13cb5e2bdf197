use serde::Serialize;
use sensorhub_core::threshold::Threshold;
use sensorhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `thresholds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ThresholdRow {
    pub id: DbId,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub min_value: f64,
    pub max_value: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ThresholdRow> for Threshold {
    fn from(row: ThresholdRow) -> Self {
        Threshold {
            id: Some(row.id),
            sensor_type: row.sensor_type,
            min_value: row.min_value,
            max_value: row.max_value,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
