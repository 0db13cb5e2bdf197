//! Threshold bounds and the validated update path.
//!
//! An update is written to the store first and mirrored into the
//! [`ThresholdCache`] only once the store has accepted it, so the cache can
//! lag behind the store but never run ahead of it.

use serde::{Deserialize, Serialize};

use crate::cache::ThresholdCache;
use crate::error::CoreError;
use crate::sensor::SensorType;
use crate::store::SensorStore;
use crate::types::{DbId, Timestamp};

/// The configured `[min_value, max_value]` range for one sensor type.
///
/// `id` and the timestamps are assigned by the store; built-in defaults that
/// were never persisted carry `null` for all three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub min_value: f64,
    pub max_value: f64,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Threshold {
    /// An unpersisted threshold, e.g. an update candidate or a default.
    pub fn new(sensor_type: impl Into<String>, min_value: f64, max_value: f64) -> Self {
        Self {
            id: None,
            sensor_type: sensor_type.into(),
            min_value,
            max_value,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    /// The built-in threshold for a known sensor type.
    pub fn default_for(sensor: SensorType) -> Self {
        let (min, max) = sensor.default_bounds();
        Self::new(sensor.as_str(), min, max)
    }

    /// Built-in thresholds for every known sensor type.
    pub fn defaults() -> Vec<Threshold> {
        SensorType::ALL.into_iter().map(Self::default_for).collect()
    }
}

/// Validate a candidate threshold before it reaches the store.
///
/// Rejects an empty type name, non-finite bounds and inverted ranges
/// (`min_value > max_value`). Equal bounds are accepted.
pub fn validate_threshold(candidate: &Threshold) -> Result<(), CoreError> {
    if candidate.sensor_type.trim().is_empty() {
        return Err(CoreError::Validation("type is required".to_string()));
    }
    validate_bounds(candidate.min_value, candidate.max_value)
}

/// Check that `min` and `max` are finite, ordered and span a finite width.
///
/// Shared with reference-parameter updates, which carry the same shape of
/// bound.
pub fn validate_bounds(min: f64, max: f64) -> Result<(), CoreError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(CoreError::Validation(
            "min_value and max_value must be finite numbers".to_string(),
        ));
    }
    if min > max {
        return Err(CoreError::Validation(format!(
            "min_value ({min}) must not exceed max_value ({max})"
        )));
    }
    if !(max - min).is_finite() {
        return Err(CoreError::Validation(format!(
            "range from {min} to {max} is too wide"
        )));
    }
    Ok(())
}

/// Validate, persist and then cache a threshold update.
///
/// On a validation or store failure the cache is left exactly as it was.
/// Updates are serialized through the cache so the last store write is also
/// the last cache write. Returns the threshold now held by both, including
/// the store's id and timestamps.
pub async fn update_threshold(
    store: &dyn SensorStore,
    cache: &ThresholdCache,
    candidate: Threshold,
) -> Result<Threshold, CoreError> {
    validate_threshold(&candidate)?;

    let sensor_type = candidate.sensor_type.trim();
    let threshold = cache
        .update_with(|| {
            store.upsert_threshold(sensor_type, candidate.min_value, candidate.max_value)
        })
        .await?;

    tracing::info!(
        sensor_type = %threshold.sensor_type,
        min_value = threshold.min_value,
        max_value = threshold.max_value,
        "Threshold updated"
    );

    Ok(threshold)
}
