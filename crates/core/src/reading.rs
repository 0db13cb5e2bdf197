use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A single persisted sensor sample. Readings are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub id: DbId,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub value: f64,
    /// Assigned by the store at insert time.
    pub timestamp: Timestamp,
}
