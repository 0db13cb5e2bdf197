//! Domain logic for the sensor monitoring backend.
//!
//! Everything in this crate is free of database and HTTP concerns: the
//! persistent store is reached only through the [`store::SensorStore`]
//! trait, which the `db` crate implements for PostgreSQL.

pub mod cache;
pub mod error;
pub mod reading;
pub mod sensor;
pub mod store;
pub mod synthesis;
pub mod threshold;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
