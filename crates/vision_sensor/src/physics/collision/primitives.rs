//! Primitive collision shapes and intersection algorithms
//!
//! Provides the geometric primitives the occlusion test and the wedge
//! mesh builder share: bounding spheres and triangles.

use crate::foundation::math::Vec3;

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if the segment `start..=end` touches this sphere
    pub fn intersects_segment(&self, start: Vec3, end: Vec3) -> bool {
        let delta = end - start;
        let length_squared = delta.magnitude_squared();

        let t = if length_squared > f32::EPSILON {
            ((self.center - start).dot(&delta) / length_squared).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let closest = start + delta * t;
        (closest - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

/// A triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Face normal by the right-hand rule, `(v1 - v0) x (v2 - v0)`
    ///
    /// Zero-area triangles return the zero vector instead of NaN.
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1
            .cross(&edge2)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros)
    }

    /// Twice the triangle's area
    pub fn doubled_area(&self) -> f32 {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0)).magnitude()
    }
}
