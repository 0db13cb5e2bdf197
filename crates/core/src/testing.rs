//! In-memory [`SensorStore`] used by the unit tests in this crate.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::reading::SensorReading;
use crate::store::{SensorStore, StoreError};
use crate::threshold::Threshold;

#[derive(Default)]
pub struct MemoryStore {
    thresholds: Mutex<BTreeMap<String, Threshold>>,
    readings: Mutex<Vec<SensorReading>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    /// Pause applied after the next threshold upsert has committed.
    stall_next_write: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stall_next_write(&self, pause: Duration) {
        *self.stall_next_write.lock().unwrap() = Some(pause);
    }

    pub fn put_threshold(&self, threshold: Threshold) {
        self.thresholds
            .lock()
            .unwrap()
            .insert(threshold.sensor_type.clone(), threshold);
    }

    pub fn threshold(&self, sensor_type: &str) -> Option<Threshold> {
        self.thresholds.lock().unwrap().get(sensor_type).cloned()
    }

    pub fn readings(&self) -> Vec<SensorReading> {
        self.readings.lock().unwrap().clone()
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SensorStore for MemoryStore {
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
        let stored = {
            let mut thresholds = self.thresholds.lock().unwrap();
            let now = Utc::now();
            let next_id = thresholds.len() as i64 + 1;
            let previous = thresholds.get(sensor_type);
            let stored = Threshold {
                id: Some(previous.and_then(|t| t.id).unwrap_or(next_id)),
                created_at: Some(previous.and_then(|t| t.created_at).unwrap_or(now)),
                updated_at: Some(now),
                ..Threshold::new(sensor_type, min_value, max_value)
            };
            thresholds.insert(sensor_type.to_string(), stored.clone());
            stored
        };

        let stall = self.stall_next_write.lock().unwrap().take();
        if let Some(pause) = stall {
            tokio::time::sleep(pause).await;
        }
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
            timestamp: Utc::now(),
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
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}
