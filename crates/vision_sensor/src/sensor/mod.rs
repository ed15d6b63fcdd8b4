//! Vision sensor
//!
//! Spatial query, then field-of-view filtering, then a visible set that is
//! replaced wholesale once per scan cycle.

pub mod candidates;
pub mod config;
pub mod fov;
pub mod scanner;

#[cfg(test)]
mod tests;

pub use candidates::{CandidateBuffer, MAX_CANDIDATES};
pub use config::SensorConfig;
pub use fov::{check_field_of_view, FovVerdict};
pub use scanner::{SensorStats, VisionSensor, MAX_SCANS_PER_TICK};
