//! Process-wide threshold cache.
//!
//! Holds one [`Threshold`] per sensor type. Readers take consistent
//! snapshots; writers replace whole entries. The cache is seeded once at
//! startup from the store and afterwards only changes through
//! [`crate::threshold::update_threshold`].

use std::collections::BTreeMap;
use std::future::Future;

use tokio::sync::{Mutex, RwLock};

use crate::store::{SensorStore, StoreError};
use crate::threshold::Threshold;

/// In-memory mirror of the thresholds held by the store.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct ThresholdCache {
    entries: RwLock<BTreeMap<String, Threshold>>,
    /// Held from the store write until the cache write of an update.
    update_lock: Mutex<()>,
}

impl ThresholdCache {
    /// A cache containing only the built-in default thresholds.
    pub fn with_defaults() -> Self {
        let entries = Threshold::defaults()
            .into_iter()
            .map(|t| (t.sensor_type.clone(), t))
            .collect();
        Self {
            entries: RwLock::new(entries),
            update_lock: Mutex::new(()),
        }
    }

    /// Seed the cache from the store.
    ///
    /// Every threshold returned by the store replaces its default; types the
    /// store does not know about keep their built-in bounds. On error the
    /// cache is left untouched so the caller can carry on with defaults.
    pub async fn load_initial(&self, store: &dyn SensorStore) -> Result<(), StoreError> {
        let thresholds = store.select_thresholds().await?;
        let count = thresholds.len();

        let mut entries = self.entries.write().await;
        for threshold in thresholds {
            entries.insert(threshold.sensor_type.clone(), threshold);
        }
        tracing::info!(loaded = count, total = entries.len(), "Threshold cache seeded");
        Ok(())
    }

    /// A consistent snapshot of every cached threshold, ordered by type.
    pub async fn get_all(&self) -> Vec<Threshold> {
        self.entries.read().await.values().cloned().collect()
    }

    /// The cached threshold for a single type.
    pub async fn get(&self, sensor_type: &str) -> Option<Threshold> {
        self.entries.read().await.get(sensor_type).cloned()
    }

    /// Replace the entry for `threshold.sensor_type` (or add it).
    pub async fn apply(&self, threshold: Threshold) {
        self.entries
            .write()
            .await
            .insert(threshold.sensor_type.clone(), threshold);
    }

    /// Run a store write and apply the threshold it returns.
    ///
    /// Only one `update_with` runs at a time, so concurrent updates reach
    /// the cache in the same order they reached the store. Readers are never
    /// blocked by the write. On error the cache is untouched.
    pub async fn update_with<F, Fut, E>(&self, write: F) -> Result<Threshold, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Threshold, E>>,
    {
        let _serial = self.update_lock.lock().await;
        let threshold = write().await?;
        self.apply(threshold.clone()).await;
        Ok(threshold)
    }

    /// Number of sensor types currently monitored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ThresholdCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}
