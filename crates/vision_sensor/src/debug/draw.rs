//! Debug drawing primitives and system
//!
//! Based on Game Engine Architecture 3rd Edition, Section 10.2:
//! "Debug drawing facilities allow programmers to render simple shapes like
//! lines, points, spheres and boxes for debugging and visualization purposes."
//!
//! The crate does not render. Hosts pull [`DebugDrawSystem::get_shapes`] each
//! frame and draw them with whatever renderer they have.

use crate::foundation::math::{Vec3, Vec4};
use crate::geometry::WedgeMesh;
use std::collections::HashMap;

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        /// Segment start
        start: Vec3,
        /// Segment end
        end: Vec3,
        /// RGBA color
        color: Vec4,
        /// Seconds left before expiry
        duration: f32,
    },

    /// Sphere at center with radius
    Sphere {
        /// Sphere center
        center: Vec3,
        /// Sphere radius
        radius: f32,
        /// RGBA color
        color: Vec4,
        /// Seconds left before expiry
        duration: f32,
        /// Outline only
        wireframe: bool,
    },

    /// Point at position
    Point {
        /// Point position
        position: Vec3,
        /// RGBA color
        color: Vec4,
        /// Screen size hint
        size: f32,
        /// Seconds left before expiry
        duration: f32,
    },

    /// World-space triangle mesh
    Mesh {
        /// Mesh already placed in world space
        mesh: WedgeMesh,
        /// RGBA color
        color: Vec4,
        /// Seconds left before expiry
        duration: f32,
    },
}

impl DebugShape {
    fn duration_mut(&mut self) -> &mut f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Point { duration, .. }
            | DebugShape::Mesh { duration, .. } => duration,
        }
    }

    /// Get remaining duration
    pub fn duration(&self) -> f32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Point { duration, .. }
            | DebugShape::Mesh { duration, .. } => *duration,
        }
    }

    /// Color of the shape
    pub fn color(&self) -> Vec4 {
        match self {
            DebugShape::Line { color, .. }
            | DebugShape::Sphere { color, .. }
            | DebugShape::Point { color, .. }
            | DebugShape::Mesh { color, .. } => *color,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: f32) -> Self {
        *self.duration_mut() = new_duration;
        self
    }

    /// Decrease duration by delta_time, returns true if expired
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let duration = self.duration_mut();
        *duration -= delta_time;
        *duration <= 0.0
    }
}

/// Debug drawing system for rendering debug shapes
///
/// GEA 10.2: "Debug rendering systems typically support both temporary shapes
/// (which expire after a certain time) and persistent shapes (which remain
/// until explicitly removed)."
///
/// A temporary shape drawn with zero duration lives until the next
/// [`update`](Self::update), which makes it a one-frame shape.
#[derive(Debug, Clone)]
pub struct DebugDrawSystem {
    /// Temporary shapes that expire after their duration
    temporary_shapes: Vec<DebugShape>,

    /// Persistent shapes that remain until manually removed
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            enabled: true,
        }
    }

    fn push_temporary(&mut self, shape: DebugShape) {
        if self.enabled {
            self.temporary_shapes.push(shape);
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, duration: f32) {
        self.push_temporary(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    /// Draw a wireframe sphere (temporary)
    pub fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, color: Vec4, duration: f32) {
        self.push_temporary(DebugShape::Sphere {
            center,
            radius,
            color,
            duration,
            wireframe: true,
        });
    }

    /// Draw a solid sphere (temporary)
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Vec4, duration: f32) {
        self.push_temporary(DebugShape::Sphere {
            center,
            radius,
            color,
            duration,
            wireframe: false,
        });
    }

    /// Draw a point (temporary)
    pub fn draw_point(&mut self, position: Vec3, color: Vec4, size: f32, duration: f32) {
        self.push_temporary(DebugShape::Point {
            position,
            color,
            size,
            duration,
        });
    }

    /// Draw a persistent shape that remains until explicitly removed
    ///
    /// Drawing again under the same id replaces the previous shape.
    pub fn draw_persistent(&mut self, id: impl Into<String>, shape: DebugShape) {
        if !self.enabled {
            return;
        }

        self.persistent_shapes.insert(id.into(), shape);
    }

    /// Look up a persistent shape
    pub fn persistent(&self, id: &str) -> Option<&DebugShape> {
        self.persistent_shapes.get(id)
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Update shape lifetimes and remove expired temporary shapes
    pub fn update(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }

        self.temporary_shapes.retain_mut(|shape| !shape.tick(delta_time));
    }

    /// Get all shapes for rendering (both temporary and persistent)
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }

        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
            .collect()
    }

    /// Get the number of active shapes
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
