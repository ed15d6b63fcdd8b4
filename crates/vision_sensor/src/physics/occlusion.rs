//! Line-of-sight occlusion
//!
//! A line cast asks whether anything blocks the segment between two points.
//! Unlike a ray cast it stops at the end point, so geometry behind the
//! target never counts.

use crate::error::CollaboratorError;
use crate::foundation::math::Vec3;
use crate::physics::collision::BoundingSphere;
use crate::physics::collision_layers::LayerMask;
use crate::spatial::AABB;

/// Segment occlusion query
pub trait OcclusionTest {
    /// True iff geometry on one of `layers` intersects the segment `from..=to`
    fn line_is_blocked(&self, from: Vec3, to: Vec3, layers: LayerMask) -> Result<bool, CollaboratorError>;
}

/// Shape of a static occluder
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OccluderShape {
    /// Solid sphere (pillars, boulders)
    Sphere(BoundingSphere),
    /// Solid axis-aligned box (walls, crates)
    Box(AABB),
}

impl OccluderShape {
    /// Check the segment against this shape
    pub fn intersects_segment(&self, from: Vec3, to: Vec3) -> bool {
        match self {
            OccluderShape::Sphere(sphere) => sphere.intersects_segment(from, to),
            OccluderShape::Box(aabb) => aabb.intersect_segment(from, to).is_some(),
        }
    }
}

/// A static piece of blocking geometry on one layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occluder {
    /// Geometry
    pub shape: OccluderShape,
    /// Layer the geometry lives on
    pub layer: LayerMask,
}

/// Flat list of static occluders
///
/// Linear scan per query; fine for the handful of walls a test scene or
/// demo level has.
#[derive(Debug, Clone, Default)]
pub struct OccluderSet {
    occluders: Vec<Occluder>,
}

impl OccluderSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an occluder
    pub fn add(&mut self, shape: OccluderShape, layer: LayerMask) {
        self.occluders.push(Occluder { shape, layer });
    }

    /// Add an axis-aligned wall
    pub fn add_box(&mut self, aabb: AABB, layer: LayerMask) {
        self.add(OccluderShape::Box(aabb), layer);
    }

    /// Add a spherical obstacle
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, layer: LayerMask) {
        self.add(OccluderShape::Sphere(BoundingSphere::new(center, radius)), layer);
    }

    /// All occluders
    pub fn occluders(&self) -> &[Occluder] {
        &self.occluders
    }

    /// Number of occluders
    pub fn len(&self) -> usize {
        self.occluders.len()
    }

    /// True when there are no occluders
    pub fn is_empty(&self) -> bool {
        self.occluders.is_empty()
    }

    /// Remove all occluders
    pub fn clear(&mut self) {
        self.occluders.clear();
    }
}

impl OcclusionTest for OccluderSet {
    fn line_is_blocked(&self, from: Vec3, to: Vec3, layers: LayerMask) -> Result<bool, CollaboratorError> {
        let blocked = self
            .occluders
            .iter()
            .filter(|occluder| layers.matches(occluder.layer))
            .any(|occluder| occluder.shape.intersects_segment(from, to));
        Ok(blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_between() -> OccluderSet {
        let mut set = OccluderSet::new();
        set.add_box(
            AABB::new(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 3.0, 4.5)),
            LayerMask::ENVIRONMENT,
        );
        set
    }

    #[test]
    fn test_wall_blocks_line_on_matching_layer() {
        let set = wall_between();
        let blocked = set
            .line_is_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 8.0), LayerMask::ENVIRONMENT)
            .unwrap();
        assert!(blocked);
    }

    #[test]
    fn test_wall_ignored_when_layer_not_in_mask() {
        let set = wall_between();
        let blocked = set
            .line_is_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 8.0), LayerMask::PROP)
            .unwrap();
        assert!(!blocked);
    }

    #[test]
    fn test_segment_ending_before_wall_is_clear() {
        let set = wall_between();
        let blocked = set
            .line_is_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 3.0), LayerMask::ALL)
            .unwrap();
        assert!(!blocked);
    }

    #[test]
    fn test_line_over_wall_is_clear() {
        let set = wall_between();
        let blocked = set
            .line_is_blocked(Vec3::new(0.0, 3.5, 0.0), Vec3::new(0.0, 3.5, 8.0), LayerMask::ALL)
            .unwrap();
        assert!(!blocked);
    }

    #[test]
    fn test_sphere_occluder() {
        let mut set = OccluderSet::new();
        set.add_sphere(Vec3::new(0.0, 1.0, 5.0), 0.5, LayerMask::PROP);
        assert!(set.line_is_blocked(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 9.0), LayerMask::PROP).unwrap());
        assert!(!set.line_is_blocked(Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 9.0), LayerMask::PROP).unwrap());
    }
}
