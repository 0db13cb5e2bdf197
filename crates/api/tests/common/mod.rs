#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sensorhub_core::cache::ThresholdCache;
use sensorhub_core::reading::SensorReading;
use sensorhub_core::store::{SensorStore, StoreError};
use sensorhub_core::threshold::Threshold;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use sensorhub_api::app::build_app;
use sensorhub_api::config::ServerConfig;
use sensorhub_api::state::AppState;
use sensorhub_db::PgSensorStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        broadcast_interval_ms: 50,
        recent_readings_limit: 10,
        db_max_connections: 5,
    }
}

/// A pool that never connects unless a query is actually run.
///
/// Used by tests that swap the store for a [`FakeStore`] and never touch
/// the CRUD endpoints.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://localhost/sensorhub_unused")
        .unwrap()
}

/// Build state backed by the real database.
pub async fn pg_state(pool: PgPool) -> AppState {
    let store: Arc<dyn SensorStore> = Arc::new(PgSensorStore::new(pool.clone()));
    let cache = Arc::new(ThresholdCache::with_defaults());
    cache.load_initial(store.as_ref()).await.unwrap();
    AppState::new(pool, store, cache, test_config())
}

/// Build state backed by the given in-memory store.
pub fn fake_state(store: Arc<FakeStore>) -> AppState {
    let cache = Arc::new(ThresholdCache::with_defaults());
    AppState::new(lazy_pool(), store, cache, test_config())
}

/// Build the full application router against the real database.
pub async fn build_test_app(pool: PgPool) -> Router {
    build_app(pg_state(pool).await)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A [`SensorStore`] kept in memory with switches to simulate an outage.
#[derive(Default)]
pub struct FakeStore {
    thresholds: Mutex<BTreeMap<String, Threshold>>,
    readings: Mutex<Vec<SensorReading>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn threshold(&self, sensor_type: &str) -> Option<Threshold> {
        self.thresholds.lock().unwrap().get(sensor_type).cloned()
    }

    pub fn reading_count(&self) -> usize {
        self.readings.lock().unwrap().len()
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SensorStore for FakeStore {
    async fn select_thresholds(&self) -> Result<Vec<Threshold>, StoreError> {
        self.check(&self.fail_reads)?;
        Ok(self.thresholds.lock().unwrap().values().cloned().collect())
    }

    async fn upsert_threshold(
        &self,
        sensor_type: &str,
        min_value: f64,
        max_value: f64,
    ) -> Result<Threshold, StoreError> {
        self.check(&self.fail_writes)?;
        let mut thresholds = self.thresholds.lock().unwrap();
        let now = chrono::Utc::now();
        let next_id = thresholds.len() as i64 + 1;
        let previous = thresholds.get(sensor_type);
        let stored = Threshold {
            id: Some(previous.and_then(|t| t.id).unwrap_or(next_id)),
            created_at: Some(previous.and_then(|t| t.created_at).unwrap_or(now)),
            updated_at: Some(now),
            ..Threshold::new(sensor_type, min_value, max_value)
        };
        thresholds.insert(sensor_type.to_string(), stored.clone());
        Ok(stored)
    }

    async fn insert_reading(&self, sensor_type: &str, value: f64) -> Result<(), StoreError> {
        self.check(&self.fail_writes)?;
        let mut readings = self.readings.lock().unwrap();
        let id = readings.len() as i64 + 1;
        readings.push(SensorReading {
            id,
            sensor_type: sensor_type.to_string(),
            value,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn select_recent_readings(
        &self,
        sensor_type: &str,
        limit: i64,
    ) -> Result<Vec<SensorReading>, StoreError> {
        self.check(&self.fail_reads)?;
        Ok(self
            .readings
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.sensor_type == sensor_type)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
