//! # Vision Sensor
//!
//! A periodic, bounded-cost vision sensor for agents in a simulated 3D world.
//!
//! ## Features
//!
//! - **Fixed cadence**: scans run at a configured frequency, driven by the
//!   host's variable frame step without long-term drift
//! - **Bounded cost**: at most 50 candidates are examined per scan
//! - **Field of view**: vertical band, horizontal opening angle and
//!   eye-level line-of-sight occlusion
//! - **Pluggable collaborators**: bring your own spatial index and occlusion
//!   test, or use the octree and occluder set shipped here
//! - **Diagnostics**: wedge mesh and debug overlay of what the sensor sees
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vision_sensor::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bounds = AABB::new(Vec3::new(-50.0, -10.0, -50.0), Vec3::new(50.0, 10.0, 50.0));
//!     let index = OctreeSpatialIndex::new(Octree::new(bounds, OctreeConfig::default()));
//!     let walls = OccluderSet::new();
//!
//!     let mut sensor = VisionSensor::new(SensorConfig::default())?;
//!     let pose = Transform::from_position_yaw(Vec3::zeros(), 45.0);
//!
//!     sensor.tick(1.0 / 60.0, &pose, &index, &walls);
//!     for event in sensor.drain_events() {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod debug;
pub mod ecs;
pub mod error;
pub mod events;
pub mod foundation;
pub mod geometry;
pub mod physics;
pub mod sensor;
pub mod spatial;

pub use error::{CollaboratorError, SensorError, SensorResult};
pub use sensor::{SensorConfig, SensorStats, VisionSensor};

/// Common imports for sensor users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        debug::{DebugDrawSystem, DebugShape, SensorDebugColors, SensorDebugVisualizer},
        ecs::Entity,
        error::{CollaboratorError, SensorError, SensorResult},
        events::{dispatch, SensorEvent, SensorEventHandler, SensorEventType},
        foundation::math::{Transform, Vec3, Vec4},
        geometry::{build_wedge_mesh, WedgeMesh, WedgeShape},
        physics::{LayerMask, OccluderSet, OcclusionTest},
        sensor::{FovVerdict, SensorConfig, SensorStats, VisionSensor},
        spatial::{
            Candidate, Octree, OctreeConfig, OctreeEntity, OctreeSpatialIndex, SpatialIndex, SphereQuery, AABB,
        },
    };
}
