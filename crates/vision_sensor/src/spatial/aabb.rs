//! Axis-aligned bounding boxes

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Check if a sphere overlaps this box
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        (self.closest_point(center) - center).magnitude_squared() <= radius * radius
    }

    /// Test the segment `start..=end` against the box using the slab method
    ///
    /// Returns the parametric entry point in `[0, 1]` if the segment touches
    /// the box. A segment starting inside the box hits at 0.
    pub fn intersect_segment(&self, start: Vec3, end: Vec3) -> Option<f32> {
        let delta = end - start;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;

        for axis in 0..3 {
            let origin = start[axis];
            let direction = delta[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if direction.abs() < f32::EPSILON {
                // Parallel to this slab: must already be inside it
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / direction;
            let mut t1 = (lo - origin) * inv;
            let mut t2 = (hi - origin) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        AABB::from_center_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_segment_through_box() {
        let hit = unit_box().intersect_segment(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));
        let t = hit.expect("segment crosses the box");
        assert!((t - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_segment_stopping_short_misses() {
        let hit = unit_box().intersect_segment(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_parallel_segment_outside_slab_misses() {
        let hit = unit_box().intersect_segment(Vec3::new(-5.0, 2.0, 0.0), Vec3::new(5.0, 2.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_segment_starting_inside_hits_at_zero() {
        let hit = unit_box().intersect_segment(Vec3::zeros(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(hit, Some(0.0));
    }

    #[test]
    fn test_sphere_overlap_uses_closest_point() {
        assert!(unit_box().intersects_sphere(Vec3::new(2.5, 0.0, 0.0), 1.5));
        assert!(!unit_box().intersects_sphere(Vec3::new(2.5, 0.0, 0.0), 1.0));
    }
}
