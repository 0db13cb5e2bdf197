use axum::extract::State;
use axum::Json;
use sensorhub_db::models::equipment::Equipment;
use sensorhub_db::repositories::EquipmentRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/equipment
pub async fn list_equipment(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Equipment>>>> {
    let equipment = EquipmentRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: equipment }))
}
