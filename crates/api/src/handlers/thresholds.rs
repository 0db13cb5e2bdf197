//! Handlers for reading and updating sensor thresholds.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sensorhub_core::threshold::{self, Threshold};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, StatusResponse};
use crate::state::AppState;

/// Request body for updating a single threshold.
#[derive(Debug, Deserialize)]
pub struct UpdateThresholdRequest {
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub min_value: f64,
    pub max_value: f64,
}

/// GET /api/thresholds
///
/// The thresholds the synthesis loop is currently using, ordered by type.
/// Served from the cache, which never runs ahead of the store.
pub async fn list_thresholds(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<Threshold>>> {
    Json(DataResponse {
        data: state.cache.get_all().await,
    })
}

/// POST /api/thresholds/update
///
/// Validate, upsert into the store, then apply to the cache. Responds only
/// after both agree.
pub async fn update_threshold(
    State(state): State<AppState>,
    payload: Result<Json<UpdateThresholdRequest>, JsonRejection>,
) -> AppResult<Json<StatusResponse>> {
    let Json(input) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let candidate = Threshold::new(input.sensor_type, input.min_value, input.max_value);
    threshold::update_threshold(state.store.as_ref(), &state.cache, candidate).await?;

    Ok(Json(StatusResponse::success()))
}
