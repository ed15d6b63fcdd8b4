//! Wedge mesh for visualizing a sensor's detection volume
//!
//! The wedge is the sensor's horizontal arc swept up through its vertical
//! band: a fan of slices spanning `[-half_angle, +half_angle]` around local
//! +Z, from the sensor origin out to `max_range`, `vertical_height` tall.
//!
//! The mesh is a flat triangle list. Every triangle owns three vertices and
//! `indices[i] == i`, so per-vertex normals are simply the face normal of
//! the triangle the vertex belongs to.
//!
//! ```text
//!  tl ______ tr        per slice: far quad (2 tris), top (1), bottom (1)
//!    |\     |          caps: left side (2), right side (2)
//!    | \    |
//!    |  \   |          triangles = segments * 4 + 4
//!  bl|___\__|br
//! ```

use crate::foundation::math::{yaw_rotation, Transform, Vec3, FORWARD, UP};
use crate::physics::collision::Triangle;
use serde::{Deserialize, Serialize};

/// Angular slices used for the sensor overlay
pub const WEDGE_SEGMENTS: u32 = 10;

/// Geometric parameters the wedge depends on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WedgeShape {
    /// Radius of the arc
    pub max_range: f32,
    /// Half of the horizontal opening angle, degrees
    pub half_angle_degrees: f32,
    /// Height of the vertical band above the origin
    pub vertical_height: f32,
}

/// Flat, unindexed triangle mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WedgeMesh {
    /// Vertex positions, three per triangle
    pub positions: Vec<Vec3>,
    /// Per-vertex normals derived from the owning triangle
    pub normals: Vec<Vec3>,
    /// Identity index buffer
    pub indices: Vec<u32>,
}

impl WedgeMesh {
    /// Build the overlay mesh for a shape with [`WEDGE_SEGMENTS`] slices
    pub fn for_shape(shape: &WedgeShape) -> Self {
        build_wedge_mesh(shape, WEDGE_SEGMENTS)
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate triangles in emission order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|tri| Triangle::new(tri[0], tri[1], tri[2]))
    }

    /// Copy of the mesh placed at `transform`
    pub fn to_world(&self, transform: &Transform) -> Self {
        let positions: Vec<Vec3> = self
            .positions
            .iter()
            .map(|&p| transform.transform_point(p))
            .collect();

        // Rigid rotation keeps normals valid; rescaling would not
        let normals = self
            .normals
            .iter()
            .map(|&n| transform.rotation * n)
            .collect();

        Self {
            positions,
            normals,
            indices: self.indices.clone(),
        }
    }
}

/// Build the wedge mesh for `shape` with `segments` angular slices
///
/// Pure function: identical inputs give bit-identical output. Zero segments
/// leaves only the two side caps; a zero angle or height gives a valid,
/// degenerate mesh whose zero-area triangles have zero normals.
pub fn build_wedge_mesh(shape: &WedgeShape, segments: u32) -> WedgeMesh {
    let triangle_count = segments as usize * 4 + 4;
    let vertex_count = triangle_count * 3;

    let angle = shape.half_angle_degrees;
    let height = UP * shape.vertical_height;
    let edge = |degrees: f32| yaw_rotation(degrees) * FORWARD * shape.max_range;

    let bottom_center = Vec3::zeros();
    let bottom_left = edge(-angle);
    let bottom_right = edge(angle);

    let top_center = bottom_center + height;
    let top_left = bottom_left + height;
    let top_right = bottom_right + height;

    let mut positions = Vec::with_capacity(vertex_count);

    // Left side
    positions.extend_from_slice(&[bottom_center, bottom_left, top_left]);
    positions.extend_from_slice(&[top_left, top_center, bottom_center]);

    // Right side
    positions.extend_from_slice(&[bottom_center, top_center, top_right]);
    positions.extend_from_slice(&[top_right, bottom_right, bottom_center]);

    if segments > 0 {
        let delta_angle = angle * 2.0 / segments as f32;

        for i in 0..segments {
            let current_angle = -angle + delta_angle * i as f32;
            let bottom_left = edge(current_angle);
            let bottom_right = edge(current_angle + delta_angle);
            let top_left = bottom_left + height;
            let top_right = bottom_right + height;

            // Far side
            positions.extend_from_slice(&[bottom_left, bottom_right, top_right]);
            positions.extend_from_slice(&[top_right, top_left, bottom_left]);

            // Top
            positions.extend_from_slice(&[top_center, top_left, top_right]);

            // Bottom
            positions.extend_from_slice(&[bottom_center, bottom_right, bottom_left]);
        }
    }

    debug_assert_eq!(positions.len(), vertex_count);

    let normals = positions
        .chunks_exact(3)
        .flat_map(|tri| {
            let normal = Triangle::new(tri[0], tri[1], tri[2]).normal();
            [normal; 3]
        })
        .collect();

    let indices = (0..vertex_count as u32).collect();

    WedgeMesh {
        positions,
        normals,
        indices,
    }
}
