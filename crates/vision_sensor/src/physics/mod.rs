//! Physics queries consumed by the sensor
//!
//! The sensor needs exactly one physics capability: "is the straight line
//! between two points blocked". [`OcclusionTest`] is that seam;
//! [`OccluderSet`] is a reference implementation over static shapes.

pub mod collision;
pub mod collision_layers;
pub mod occlusion;

pub use collision::{BoundingSphere, Triangle};
pub use collision_layers::LayerMask;
pub use occlusion::{OcclusionTest, Occluder, OccluderShape, OccluderSet};
