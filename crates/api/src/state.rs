use std::sync::Arc;

use sensorhub_core::cache::ThresholdCache;
use sensorhub_core::store::SensorStore;
use sensorhub_core::synthesis::SynthesisEngine;

use crate::config::ServerConfig;
use crate::ws::SessionRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (CRUD endpoints and health).
    pub pool: sensorhub_db::DbPool,
    /// Store adapter used by the threshold update path and synthesis.
    pub store: Arc<dyn SensorStore>,
    /// Process-wide threshold cache.
    pub cache: Arc<ThresholdCache>,
    /// Reading synthesis shared by every broadcast session.
    pub engine: SynthesisEngine,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live broadcast sessions.
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Wire the state together from its collaborators.
    pub fn new(
        pool: sensorhub_db::DbPool,
        store: Arc<dyn SensorStore>,
        cache: Arc<ThresholdCache>,
        config: ServerConfig,
    ) -> Self {
        let engine = SynthesisEngine::new(Arc::clone(&store), Arc::clone(&cache))
            .with_history_limit(config.recent_readings_limit);
        Self {
            pool,
            store,
            cache,
            engine,
            config: Arc::new(config),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}
