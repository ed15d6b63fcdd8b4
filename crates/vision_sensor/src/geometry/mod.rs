//! Procedural geometry for diagnostic overlays

pub mod wedge;

pub use wedge::{build_wedge_mesh, WedgeMesh, WedgeShape, WEDGE_SEGMENTS};
