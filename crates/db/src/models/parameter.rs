//! Process parameters attached to equipment, their reference ranges and
//! their sampled current values.

use serde::{Deserialize, Serialize};
use sensorhub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A measurable parameter of a piece of equipment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcessParameter {
    pub id: DbId,
    pub equipment_id: DbId,
    pub name: String,
    pub units: String,
}

/// DTO for inserting a process parameter.
#[derive(Debug, Clone)]
pub struct CreateProcessParameter {
    pub equipment_id: DbId,
    pub name: String,
    pub units: String,
}

/// The allowed range for a process parameter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReferenceParameter {
    pub id: DbId,
    pub param_id: DbId,
    #[serde(rename = "min")]
    pub min_value: f64,
    #[serde(rename = "max")]
    pub max_value: f64,
}

/// DTO for upserting a reference range, keyed by `param_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertReferenceParameter {
    pub param_id: DbId,
    pub min: f64,
    pub max: f64,
}

/// One sampled value of a process parameter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurrentParameter {
    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
    pub param_id: DbId,
    pub value: f64,
}
