//! Repository for the `equipment` table.

use sqlx::PgPool;

use crate::models::equipment::{CreateEquipment, Equipment};

/// Column list for `equipment` queries.
const COLUMNS: &str = "id, name, equipment_type, status";

/// Provides query operations for equipment.
pub struct EquipmentRepo;

impl EquipmentRepo {
    /// List all equipment ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Equipment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM equipment ORDER BY id");
        sqlx::query_as::<_, Equipment>(&query).fetch_all(pool).await
    }

    /// Insert equipment unless a row with the same name exists.
    ///
    /// Returns `true` when a row was inserted.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateEquipment,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO equipment (name, equipment_type, status) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(&input.name)
        .bind(&input.equipment_type)
        .bind(&input.status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
