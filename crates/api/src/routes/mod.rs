pub mod equipment;
pub mod health;
pub mod parameters;
pub mod thresholds;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /thresholds                      current threshold set (GET)
/// /thresholds/update               upsert one threshold (POST)
///
/// /equipment                       list equipment (GET)
///
/// /parameters/current              latest parameter samples (GET)
/// /parameters/reference            upsert a reference range (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(thresholds::router())
        .merge(equipment::router())
        .merge(parameters::router())
}

/// The subscriber WebSocket, mounted at the root as `/ws`.
pub fn ws_routes() -> Router<AppState> {
    Router::new().route("/ws", get(ws::ws_handler))
}
