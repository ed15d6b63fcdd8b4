//! Narrow-phase geometry used by line-of-sight tests
//!
//! - [`primitives`] - Basic geometric primitives (spheres, triangles)

pub mod primitives;

pub use primitives::{BoundingSphere, Triangle};
