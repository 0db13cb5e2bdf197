//! Handlers for process parameters and their reference ranges.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use sensorhub_core::threshold::validate_bounds;
use sensorhub_db::models::parameter::{CurrentParameter, UpsertReferenceParameter};
use sensorhub_db::repositories::ParameterRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, StatusResponse};
use crate::state::AppState;

/// Number of samples returned by the current-parameters endpoint.
const CURRENT_PARAMETERS_LIMIT: i64 = 100;

/// GET /api/parameters/current
///
/// The latest sampled parameter values, newest first.
pub async fn list_current_parameters(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CurrentParameter>>>> {
    let params = ParameterRepo::list_current(&state.pool, CURRENT_PARAMETERS_LIMIT).await?;
    Ok(Json(DataResponse { data: params }))
}

/// POST /api/parameters/reference
///
/// Upsert the reference range for a process parameter. An unknown
/// `param_id` yields 404.
pub async fn update_reference_parameter(
    State(state): State<AppState>,
    payload: Result<Json<UpsertReferenceParameter>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    validate_bounds(input.min, input.max)?;

    let reference = ParameterRepo::upsert_reference(&state.pool, &input).await?;
    tracing::info!(
        param_id = reference.param_id,
        min = reference.min_value,
        max = reference.max_value,
        "Reference parameter updated"
    );

    Ok(Json(StatusResponse::success()))
}
