//! Vision sensor overlay
//!
//! Draws what a [`VisionSensor`] sees: its detection wedge, the broad-phase
//! radius, every buffered candidate and a sight line to each visible entity.

use crate::debug::draw::{DebugDrawSystem, DebugShape};
use crate::events::{SensorEvent, SensorEventHandler};
use crate::foundation::math::{Transform, Vec4};
use crate::geometry::WedgeMesh;
use crate::sensor::fov::eye_origin;
use crate::sensor::{SensorConfig, VisionSensor};

/// Persistent shape id of the wedge
pub const WEDGE_SHAPE_ID: &str = "sensor_wedge";

/// Radius of the marker spheres drawn on candidates and visible entities
pub const MARKER_RADIUS: f32 = 0.2;

/// Color scheme for the sensor overlay
#[derive(Clone, Debug, PartialEq)]
pub struct SensorDebugColors {
    /// Wedge mesh and candidate markers
    pub wedge: Vec4,

    /// Broad-phase radius outline
    pub range: Vec4,

    /// Visible entity markers and sight lines
    pub visible: Vec4,
}

impl Default for SensorDebugColors {
    fn default() -> Self {
        Self {
            wedge: Vec4::new(1.0, 0.0, 0.0, 0.5),   // Red, semi-transparent
            range: Vec4::new(1.0, 1.0, 1.0, 0.25),  // White, faint
            visible: Vec4::new(0.0, 1.0, 0.0, 1.0), // Green
        }
    }
}

/// Sensor-specific debug visualizer
///
/// Keeps the wedge mesh in sensor-local space and only rebuilds it when the
/// sensor reports a configuration change.
#[derive(Debug, Clone)]
pub struct SensorDebugVisualizer {
    debug_draw: DebugDrawSystem,
    colors: SensorDebugColors,
    wedge: WedgeMesh,

    /// Show the detection wedge
    pub show_wedge: bool,

    /// Show the broad-phase radius and candidate markers
    pub show_candidates: bool,

    /// Show sight lines to visible entities
    pub show_sight_lines: bool,
}

impl SensorDebugVisualizer {
    /// Create a visualizer for a sensor with `config`
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            debug_draw: DebugDrawSystem::new(),
            colors: SensorDebugColors::default(),
            wedge: WedgeMesh::for_shape(&config.shape()),
            show_wedge: true,
            show_candidates: true,
            show_sight_lines: true,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: SensorDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Sensor-local wedge mesh
    pub fn wedge(&self) -> &WedgeMesh {
        &self.wedge
    }

    /// Queue the overlay for one frame
    ///
    /// The wedge is persistent and follows the pose; everything else lasts
    /// until the next [`update`](Self::update).
    pub fn draw(&mut self, pose: &Transform, sensor: &VisionSensor) {
        if self.show_wedge {
            self.debug_draw.draw_persistent(
                WEDGE_SHAPE_ID,
                DebugShape::Mesh {
                    mesh: self.wedge.to_world(pose),
                    color: self.colors.wedge,
                    duration: f32::INFINITY,
                },
            );
        } else {
            self.debug_draw.clear_persistent(WEDGE_SHAPE_ID);
        }

        if self.show_candidates {
            self.debug_draw
                .draw_wire_sphere(pose.position, sensor.config().max_range, self.colors.range, 0.0);
            for candidate in sensor.candidates() {
                self.debug_draw
                    .draw_sphere(candidate.position, MARKER_RADIUS, self.colors.wedge, 0.0);
            }
        }

        let eyes = eye_origin(pose, sensor.config());
        for candidate in sensor.candidates() {
            if !sensor.is_visible(candidate.entity) {
                continue;
            }
            self.debug_draw
                .draw_sphere(candidate.position, MARKER_RADIUS, self.colors.visible, 0.0);
            if self.show_sight_lines {
                self.debug_draw
                    .draw_line(eyes, candidate.position, self.colors.visible, 0.0);
            }
        }
    }

    /// Expire one-frame shapes
    pub fn update(&mut self, delta_time: f32) {
        self.debug_draw.update(delta_time);
    }

    /// Get all debug shapes for rendering
    pub fn get_shapes(&self) -> Vec<&DebugShape> {
        self.debug_draw.get_shapes()
    }

    /// Enable/disable the entire overlay
    pub fn set_enabled(&mut self, enabled: bool) {
        self.debug_draw.enabled = enabled;
    }

    /// Check if the overlay is enabled
    pub fn is_enabled(&self) -> bool {
        self.debug_draw.enabled
    }

    /// Get reference to underlying debug draw system
    pub fn debug_draw(&self) -> &DebugDrawSystem {
        &self.debug_draw
    }
}

impl SensorEventHandler for SensorDebugVisualizer {
    fn on_event(&mut self, event: &SensorEvent) -> bool {
        if let SensorEvent::ConfigChanged { shape, .. } = event {
            log::debug!("Rebuilding sensor wedge for {shape:?}");
            self.wedge = WedgeMesh::for_shape(shape);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::Entity;
    use crate::error::CollaboratorError;
    use crate::foundation::math::Vec3;
    use crate::physics::collision_layers::LayerMask;
    use crate::physics::occlusion::OcclusionTest;
    use crate::sensor::CandidateBuffer;
    use crate::spatial::{Candidate, SpatialIndex, SphereQuery};

    struct FixedIndex(Vec<Candidate>);

    impl SpatialIndex for FixedIndex {
        fn query_within_radius(&self, _: &SphereQuery, hits: &mut CandidateBuffer) -> Result<(), CollaboratorError> {
            for &hit in &self.0 {
                hits.push(hit);
            }
            Ok(())
        }
    }

    struct ClearSight;

    impl OcclusionTest for ClearSight {
        fn line_is_blocked(&self, _: Vec3, _: Vec3, _: LayerMask) -> Result<bool, CollaboratorError> {
            Ok(false)
        }
    }

    fn count_lines(viz: &SensorDebugVisualizer) -> usize {
        viz.get_shapes()
            .into_iter()
            .filter(|s| matches!(s, DebugShape::Line { .. }))
            .count()
    }

    #[test]
    fn test_draw_emits_wedge_range_markers_and_sight_lines() {
        let config = SensorConfig::default();
        let mut sensor = VisionSensor::new(config.clone()).unwrap();
        let index = FixedIndex(vec![
            Candidate::new(Entity::new(1), Vec3::new(0.0, 0.5, 5.0)),
            Candidate::new(Entity::new(2), Vec3::new(0.0, 0.5, -5.0)),
        ]);
        sensor.scan(&Transform::identity(), &index, &ClearSight).unwrap();

        let mut viz = SensorDebugVisualizer::new(&config);
        viz.draw(&Transform::identity(), &sensor);

        // wedge + range + 2 candidate markers + 1 visible marker + 1 line
        assert_eq!(viz.get_shapes().len(), 6);
        assert_eq!(count_lines(&viz), 1);

        viz.update(0.016);
        assert_eq!(viz.get_shapes().len(), 1);
        assert!(viz.debug_draw().persistent(WEDGE_SHAPE_ID).is_some());
    }

    #[test]
    fn test_wedge_follows_pose() {
        let config = SensorConfig::default();
        let sensor = VisionSensor::new(config.clone()).unwrap();
        let mut viz = SensorDebugVisualizer::new(&config);

        let pose = Transform::from_position(Vec3::new(3.0, 0.0, 0.0));
        viz.draw(&pose, &sensor);

        let Some(DebugShape::Mesh { mesh, .. }) = viz.debug_draw().persistent(WEDGE_SHAPE_ID) else {
            panic!("wedge missing");
        };
        assert_eq!(mesh.positions[0], Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_config_change_rebuilds_wedge() {
        let mut sensor = VisionSensor::new(SensorConfig::default()).unwrap();
        let mut viz = SensorDebugVisualizer::new(sensor.config());
        let before = viz.wedge().clone();

        sensor
            .apply_config(SensorConfig::default().with_range(25.0))
            .unwrap();
        for event in sensor.drain_events() {
            assert!(!viz.on_event(&event));
        }

        assert_ne!(viz.wedge(), &before);
        assert_eq!(viz.wedge().triangle_count(), before.triangle_count());
    }

    #[test]
    fn test_hidden_wedge_is_removed() {
        let config = SensorConfig::default();
        let sensor = VisionSensor::new(config.clone()).unwrap();
        let mut viz = SensorDebugVisualizer::new(&config);

        viz.draw(&Transform::identity(), &sensor);
        viz.show_wedge = false;
        viz.draw(&Transform::identity(), &sensor);

        assert!(viz.debug_draw().persistent(WEDGE_SHAPE_ID).is_none());
    }
}
