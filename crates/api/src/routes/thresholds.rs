use axum::routing::{get, post};
use axum::Router;

use crate::handlers::thresholds;
use crate::state::AppState;

/// Threshold routes, merged into `/api`.
///
/// ```text
/// GET  /thresholds          -> list_thresholds
/// POST /thresholds/update   -> update_threshold
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/thresholds", get(thresholds::list_thresholds))
        .route("/thresholds/update", post(thresholds::update_threshold))
}
