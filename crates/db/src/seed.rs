//! Default rows inserted at startup.
//!
//! Seeding never overwrites existing rows, so operator changes to
//! thresholds survive restarts.

use sensorhub_core::threshold::Threshold;
use sqlx::PgPool;

use crate::models::equipment::CreateEquipment;
use crate::repositories::{EquipmentRepo, ThresholdRepo};

/// Equipment present in a fresh installation: `(name, type, status)`.
const DEFAULT_EQUIPMENT: [(&str, &str, &str); 3] = [
    ("Press 1", "press", "operational"),
    ("Temperature sensor", "sensor", "operational"),
    ("Controller", "controller", "under_repair"),
];

/// Counts of rows inserted by [`seed_defaults`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub equipment: usize,
    pub thresholds: usize,
}

/// Insert default equipment and thresholds that are not present yet.
pub async fn seed_defaults(pool: &PgPool) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    for (name, equipment_type, status) in DEFAULT_EQUIPMENT {
        let input = CreateEquipment {
            name: name.to_string(),
            equipment_type: equipment_type.to_string(),
            status: status.to_string(),
        };
        if EquipmentRepo::insert_if_absent(pool, &input).await? {
            report.equipment += 1;
        }
    }

    for threshold in Threshold::defaults() {
        if ThresholdRepo::insert_if_absent(
            pool,
            &threshold.sensor_type,
            threshold.min_value,
            threshold.max_value,
        )
        .await?
        {
            report.thresholds += 1;
        }
    }

    tracing::info!(
        equipment = report.equipment,
        thresholds = report.thresholds,
        "Default rows seeded"
    );
    Ok(report)
}
