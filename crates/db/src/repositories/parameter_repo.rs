//! Repository for process parameters, their reference ranges and sampled
//! current values.

use sensorhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::parameter::{
    CreateProcessParameter, CurrentParameter, ProcessParameter, ReferenceParameter,
    UpsertReferenceParameter,
};

/// Provides query operations for the parameter tables.
pub struct ParameterRepo;

impl ParameterRepo {
    /// Register a process parameter for a piece of equipment.
    pub async fn create_process_parameter(
        pool: &PgPool,
        input: &CreateProcessParameter,
    ) -> Result<ProcessParameter, sqlx::Error> {
        sqlx::query_as::<_, ProcessParameter>(
            "INSERT INTO process_parameters (equipment_id, name, units) \
             VALUES ($1, $2, $3) \
             RETURNING id, equipment_id, name, units",
        )
        .bind(input.equipment_id)
        .bind(&input.name)
        .bind(&input.units)
        .fetch_one(pool)
        .await
    }

    /// Record a sampled value for a process parameter.
    pub async fn record_current(
        pool: &PgPool,
        param_id: DbId,
        value: f64,
    ) -> Result<CurrentParameter, sqlx::Error> {
        sqlx::query_as::<_, CurrentParameter>(
            "INSERT INTO current_parameters (param_id, value) \
             VALUES ($1, $2) \
             RETURNING recorded_at, param_id, value",
        )
        .bind(param_id)
        .bind(value)
        .fetch_one(pool)
        .await
    }

    /// The latest `limit` sampled values across all parameters, newest first.
    pub async fn list_current(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<CurrentParameter>, sqlx::Error> {
        sqlx::query_as::<_, CurrentParameter>(
            "SELECT recorded_at, param_id, value FROM current_parameters \
             ORDER BY recorded_at DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Insert or replace the reference range for a parameter.
    pub async fn upsert_reference(
        pool: &PgPool,
        input: &UpsertReferenceParameter,
    ) -> Result<ReferenceParameter, sqlx::Error> {
        sqlx::query_as::<_, ReferenceParameter>(
            "INSERT INTO reference_parameters (param_id, min_value, max_value) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (param_id) \
             DO UPDATE SET \
                min_value = EXCLUDED.min_value, \
                max_value = EXCLUDED.max_value \
             RETURNING id, param_id, min_value, max_value",
        )
        .bind(input.param_id)
        .bind(input.min)
        .bind(input.max)
        .fetch_one(pool)
        .await
    }
}
