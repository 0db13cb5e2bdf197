//! Sensor value synthesis.
//!
//! Each invocation draws one value per cached sensor type, uniformly within
//! that type's bound, persists it and collects the latest history for the
//! type. The first store failure aborts the whole invocation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cache::ThresholdCache;
use crate::reading::SensorReading;
use crate::store::{SensorStore, StoreError};
use crate::threshold::Threshold;

/// Number of recent readings returned per sensor type.
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;

/// Distinguishes seeds taken within the same clock tick.
static SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The message pushed to a subscriber on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Fresh readings plus recent history, concatenated across all types.
    pub data: Vec<SensorReading>,
    /// The full threshold set at the time of the tick.
    pub thresholds: Vec<Threshold>,
}

/// Produces and persists synthetic readings for every cached sensor type.
///
/// Cheap to clone; all state is shared behind `Arc`.
#[derive(Clone)]
pub struct SynthesisEngine {
    store: Arc<dyn SensorStore>,
    cache: Arc<ThresholdCache>,
    history_limit: i64,
}

impl SynthesisEngine {
    pub fn new(store: Arc<dyn SensorStore>, cache: Arc<ThresholdCache>) -> Self {
        Self {
            store,
            cache,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Override how many recent readings are returned per type.
    pub fn with_history_limit(mut self, history_limit: i64) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Run one synthesis pass with a generator seeded from the wall clock.
    pub async fn run_once(&self) -> Result<Vec<SensorReading>, StoreError> {
        let mut rng = StdRng::seed_from_u64(clock_seed());
        self.run_with_rng(&mut rng).await
    }

    /// Run one synthesis pass drawing from the supplied generator.
    pub async fn run_with_rng<R>(&self, rng: &mut R) -> Result<Vec<SensorReading>, StoreError>
    where
        R: Rng + Send,
    {
        let thresholds = self.cache.get_all().await;
        let mut data = Vec::with_capacity(thresholds.len() * self.history_limit.max(0) as usize);

        for threshold in &thresholds {
            let value = draw_within(rng, threshold.min_value, threshold.max_value);
            self.store
                .insert_reading(&threshold.sensor_type, value)
                .await?;

            let recent = self
                .store
                .select_recent_readings(&threshold.sensor_type, self.history_limit)
                .await?;
            data.extend(recent);
        }

        tracing::trace!(
            types = thresholds.len(),
            readings = data.len(),
            "Synthesis pass complete"
        );
        Ok(data)
    }

    /// Run one synthesis pass and pair the result with the current
    /// threshold set.
    pub async fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let data = self.run_once().await?;
        let thresholds = self.cache.get_all().await;
        Ok(Snapshot { data, thresholds })
    }
}

/// Draw a value uniformly from `[min, max]` inclusive.
///
/// Equal bounds yield the bound itself. Bounds loaded from the store are not
/// re-validated, so an inverted pair is drawn over the swapped interval and
/// a span too wide for `f64` is interpolated instead of subtracted. Never
/// panics for finite bounds.
pub fn draw_within<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    if low == high {
        return low;
    }
    if (high - low).is_finite() {
        return rng.random_range(low..=high);
    }
    let u: f64 = rng.random();
    (low * (1.0 - u) + high * u).clamp(low, high)
}

fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let nth = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    nanos ^ nth.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
