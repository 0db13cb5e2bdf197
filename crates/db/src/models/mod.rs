//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and, where the table is writable through the API, a
//! `Deserialize` DTO for inserts or upserts.

pub mod equipment;
pub mod parameter;
pub mod sensor_reading;
pub mod threshold;
