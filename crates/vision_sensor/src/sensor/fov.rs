//! Field-of-view test
//!
//! A candidate is visible when, relative to the sensor origin, it is
//!
//! 1. inside the vertical band `0 ..= vertical_height` (never below the
//!    sensor, whatever the angle),
//! 2. within `half_angle_degrees` of the forward axis once projected onto
//!    the horizontal plane, and
//! 3. not hidden behind geometry on the occlusion layers, sighted from eye
//!    level rather than from the feet.
//!
//! Checks run cheapest first; the occlusion collaborator is only called
//! for candidates that already passed the geometric checks.

use crate::error::CollaboratorError;
use crate::foundation::math::{utils, Transform, Vec3, UP};
use crate::physics::occlusion::OcclusionTest;
use crate::sensor::config::SensorConfig;

/// Outcome of the field-of-view test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FovVerdict {
    /// All checks passed
    Visible,
    /// Candidate is lower than the sensor origin
    BelowSensor,
    /// Candidate is higher than the vertical band
    AboveBand,
    /// Candidate is outside the horizontal opening angle
    OutsideAngle,
    /// Line of sight from eye level is blocked
    Occluded,
}

impl FovVerdict {
    /// True for [`FovVerdict::Visible`]
    pub fn is_visible(self) -> bool {
        self == FovVerdict::Visible
    }
}

/// Point sight lines start from: the sensor origin raised to eye level
pub fn eye_origin(pose: &Transform, config: &SensorConfig) -> Vec3 {
    pose.position + UP * config.eye_height()
}

/// Vertical band and horizontal angle checks only
pub fn check_geometry(pose: &Transform, config: &SensorConfig, target: Vec3) -> FovVerdict {
    let dir = target - pose.position;

    if dir.y < 0.0 {
        return FovVerdict::BelowSensor;
    }
    if dir.y > config.vertical_height {
        return FovVerdict::AboveBand;
    }

    // Strictly greater: a candidate exactly on the boundary passes
    let delta_angle = utils::angle_degrees(utils::flatten(dir), pose.forward());
    if delta_angle > config.half_angle_degrees {
        return FovVerdict::OutsideAngle;
    }

    FovVerdict::Visible
}

/// Full field-of-view test for one candidate position
pub fn check_field_of_view<O>(
    pose: &Transform,
    config: &SensorConfig,
    target: Vec3,
    occlusion: &O,
) -> Result<FovVerdict, CollaboratorError>
where
    O: OcclusionTest + ?Sized,
{
    let verdict = check_geometry(pose, config, target);
    if !verdict.is_visible() {
        return Ok(verdict);
    }

    let origin = eye_origin(pose, config);
    if occlusion.line_is_blocked(origin, target, config.occlusion_layers)? {
        return Ok(FovVerdict::Occluded);
    }

    Ok(FovVerdict::Visible)
}
