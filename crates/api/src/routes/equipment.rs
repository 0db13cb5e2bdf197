use axum::routing::get;
use axum::Router;

use crate::handlers::equipment;
use crate::state::AppState;

/// Equipment routes, merged into `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/equipment", get(equipment::list_equipment))
}
