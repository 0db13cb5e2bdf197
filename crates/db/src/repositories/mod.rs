//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod equipment_repo;
pub mod parameter_repo;
pub mod sensor_reading_repo;
pub mod threshold_repo;

pub use equipment_repo::EquipmentRepo;
pub use parameter_repo::ParameterRepo;
pub use sensor_reading_repo::SensorReadingRepo;
pub use threshold_repo::ThresholdRepo;
