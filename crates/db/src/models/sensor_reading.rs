use sensorhub_core::reading::SensorReading;
use sensorhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the append-only `sensor_readings` table.
#[derive(Debug, Clone, FromRow)]
pub struct SensorReadingRow {
    pub id: DbId,
    pub sensor_type: String,
    pub value: f64,
    pub recorded_at: Timestamp,
}

impl From<SensorReadingRow> for SensorReading {
    fn from(row: SensorReadingRow) -> Self {
        SensorReading {
            id: row.id,
            sensor_type: row.sensor_type,
            value: row.value,
            timestamp: row.recorded_at,
        }
    }
}
