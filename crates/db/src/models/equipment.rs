use serde::Serialize;
use sensorhub_core::types::DbId;
use sqlx::FromRow;

/// A piece of monitored equipment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Equipment {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub status: String,
}

/// DTO for inserting equipment.
#[derive(Debug, Clone)]
pub struct CreateEquipment {
    pub name: String,
    pub equipment_type: String,
    pub status: String,
}
