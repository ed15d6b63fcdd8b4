//! Math utilities and types
//!
//! Provides the vector, point and rotation aliases used by the sensor.
//! The world is Y-up; a sensor looks down its local +Z axis.

pub use nalgebra::{Vector3, Vector4, Unit, UnitQuaternion};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colors for debug drawing)
pub type Vec4 = Vector4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// World up axis
pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Local forward axis of a sensor
pub const FORWARD: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Rigid transform used as a sensor pose
///
/// Only position and rotation matter for sensing; scale is kept so the
/// overlay can place the wedge mesh the same way the host places models.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Create a transform at `position` turned `yaw_degrees` about the up axis
    pub fn from_position_yaw(position: Vec3, yaw_degrees: f32) -> Self {
        Self::from_position_rotation(position, yaw_rotation(yaw_degrees))
    }

    /// Forward direction (local +Z) in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * FORWARD
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(&point)
    }

    /// Apply this transform to a direction (no translation)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * self.scale.component_mul(&vector)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Zero the vertical component of a vector
    pub fn flatten(v: Vec3) -> Vec3 {
        Vec3::new(v.x, 0.0, v.z)
    }

    /// Unsigned angle between two vectors in degrees, in `[0, 180]`
    ///
    /// Returns 0 when either vector is (close to) zero length.
    pub fn angle_degrees(from: Vec3, to: Vec3) -> f32 {
        if from.magnitude_squared() < 1e-15 || to.magnitude_squared() < 1e-15 {
            return 0.0;
        }
        // atan2 keeps precision near 0 and 180 where acos does not
        let sin = from.cross(&to).magnitude();
        let cos = from.dot(&to);
        rad_to_deg(sin.atan2(cos))
    }
}

/// Rotation of `degrees` about the world up axis
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), utils::deg_to_rad(degrees))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yaw_turns_forward_towards_positive_x() {
        let turned = yaw_rotation(90.0) * FORWARD;
        assert_relative_eq!(turned, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_angle_between_perpendicular_vectors() {
        let angle = utils::angle_degrees(Vec3::new(1.0, 0.0, 0.0), FORWARD);
        assert_relative_eq!(angle, 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_with_zero_vector_is_zero() {
        assert_eq!(utils::angle_degrees(Vec3::zeros(), FORWARD), 0.0);
    }

    #[test]
    fn test_transform_point_applies_rotation_then_translation() {
        let transform = Transform::from_position_yaw(Vec3::new(0.0, 2.0, 0.0), 90.0);
        let world = transform.transform_point(Vec3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(world, Vec3::new(3.0, 2.0, 0.0), epsilon = 1e-5);
    }
}
