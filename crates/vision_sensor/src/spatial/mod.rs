//! Spatial partitioning data structures
//!
//! Provides the broad-phase seam the sensor queries ([`SpatialIndex`]) and
//! an octree implementation of it for hosts without their own physics scene.

mod aabb;
mod octree;
mod spatial_query;

pub use aabb::AABB;
pub use octree::{Octree, OctreeNode, OctreeConfig, OctreeEntity};
pub use spatial_query::{
    Candidate, OctreeSpatialIndex, QueryTriggerInteraction, SpatialIndex, SphereQuery,
};
