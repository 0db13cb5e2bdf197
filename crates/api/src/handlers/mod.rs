pub mod equipment;
pub mod parameters;
pub mod thresholds;
