//! Catalogue of the built-in sensor types and their default bounds.
//!
//! The threshold cache is keyed by plain strings so operators can add new
//! types at runtime; [`SensorType`] only names the ones the system ships with.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Sensor type name for temperature readings.
pub const SENSOR_TEMPERATURE: &str = "temperature";
/// Sensor type name for humidity readings.
pub const SENSOR_HUMIDITY: &str = "humidity";
/// Sensor type name for pressure readings.
pub const SENSOR_PRESSURE: &str = "pressure";

/// A sensor type known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorType {
    Temperature,
    Humidity,
    Pressure,
}

impl SensorType {
    /// All built-in sensor types, in display order.
    pub const ALL: [SensorType; 3] = [
        SensorType::Temperature,
        SensorType::Humidity,
        SensorType::Pressure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SensorType::Temperature => SENSOR_TEMPERATURE,
            SensorType::Humidity => SENSOR_HUMIDITY,
            SensorType::Pressure => SENSOR_PRESSURE,
        }
    }

    /// Built-in `(min, max)` bound used until the store says otherwise.
    pub fn default_bounds(self) -> (f64, f64) {
        match self {
            SensorType::Temperature => (20.0, 35.0),
            SensorType::Humidity => (30.0, 80.0),
            SensorType::Pressure => (900.0, 1100.0),
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SENSOR_TEMPERATURE => Ok(SensorType::Temperature),
            SENSOR_HUMIDITY => Ok(SensorType::Humidity),
            SENSOR_PRESSURE => Ok(SensorType::Pressure),
            other => Err(CoreError::Validation(format!(
                "unknown sensor type: {other}"
            ))),
        }
    }
}
