use axum::routing::{get, post};
use axum::Router;

use crate::handlers::parameters;
use crate::state::AppState;

/// Parameter routes, merged into `/api`.
///
/// ```text
/// GET  /parameters/current      -> list_current_parameters
/// POST /parameters/reference    -> update_reference_parameter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/parameters/current", get(parameters::list_current_parameters))
        .route("/parameters/reference", post(parameters::update_reference_parameter))
}
