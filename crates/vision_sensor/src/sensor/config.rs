//! Sensor configuration
//!
//! Loaded from RON or TOML through [`Config`], or built in code. A config is
//! only ever installed after [`SensorConfig::check`] accepts it.

use crate::config::{Config, ConfigError};
use crate::error::{SensorError, SensorResult};
use crate::foundation::math::Vec3;
use crate::geometry::WedgeShape;
use crate::physics::collision_layers::LayerMask;
use serde::{Deserialize, Serialize};

/// Geometric and timing parameters of a vision sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Eye position relative to the sensor origin
    pub origin_offset_eyes: Vec3,

    /// Feet position relative to the sensor origin
    pub origin_offset_feet: Vec3,

    /// Detection radius in world units
    pub max_range: f32,

    /// Half of the horizontal field of view, degrees in `[0, 180]`
    pub half_angle_degrees: f32,

    /// Height of the detection band above the sensor origin
    pub vertical_height: f32,

    /// Scan cycles per second
    pub scan_frequency_hz: u32,

    /// Layers an entity must be on to be a candidate
    pub candidate_layers: LayerMask,

    /// Layers that block line of sight
    pub occlusion_layers: LayerMask,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            origin_offset_eyes: Vec3::new(0.0, 1.6, 0.0),
            origin_offset_feet: Vec3::zeros(),
            max_range: 10.0,
            half_angle_degrees: 30.0,
            vertical_height: 1.0,
            scan_frequency_hz: 30,
            candidate_layers: LayerMask::ALL,
            occlusion_layers: LayerMask::ENVIRONMENT,
        }
    }
}

impl SensorConfig {
    /// Validate all fields
    pub fn check(&self) -> SensorResult<()> {
        if !self.max_range.is_finite() || self.max_range <= 0.0 {
            return Err(SensorError::configuration(
                "max_range",
                format!("must be positive and finite, got {}", self.max_range),
            ));
        }

        if !(0.0..=180.0).contains(&self.half_angle_degrees) {
            return Err(SensorError::configuration(
                "half_angle_degrees",
                format!("must be within [0, 180], got {}", self.half_angle_degrees),
            ));
        }

        if !self.vertical_height.is_finite() || self.vertical_height < 0.0 {
            return Err(SensorError::configuration(
                "vertical_height",
                format!("must be non-negative and finite, got {}", self.vertical_height),
            ));
        }

        if self.scan_frequency_hz == 0 {
            return Err(SensorError::configuration("scan_frequency_hz", "must be greater than zero"));
        }

        let offsets_finite = self
            .origin_offset_eyes
            .iter()
            .chain(self.origin_offset_feet.iter())
            .all(|c| c.is_finite());
        if !offsets_finite {
            return Err(SensorError::configuration("origin_offset", "eye and feet offsets must be finite"));
        }

        Ok(())
    }

    /// Seconds between scan cycles
    pub fn scan_interval(&self) -> f32 {
        1.0 / self.scan_frequency_hz.max(1) as f32
    }

    /// Vertical lift from the sensor origin to eye level
    pub fn eye_height(&self) -> f32 {
        self.origin_offset_eyes.y - self.origin_offset_feet.y
    }

    /// Parameters of the visualization wedge
    pub fn shape(&self) -> WedgeShape {
        WedgeShape {
            max_range: self.max_range,
            half_angle_degrees: self.half_angle_degrees,
            vertical_height: self.vertical_height,
        }
    }

    /// Builder: detection radius
    pub fn with_range(mut self, max_range: f32) -> Self {
        self.max_range = max_range;
        self
    }

    /// Builder: half field of view in degrees
    pub fn with_half_angle(mut self, half_angle_degrees: f32) -> Self {
        self.half_angle_degrees = half_angle_degrees;
        self
    }

    /// Builder: vertical band height
    pub fn with_height(mut self, vertical_height: f32) -> Self {
        self.vertical_height = vertical_height;
        self
    }

    /// Builder: scan frequency
    pub fn with_frequency(mut self, scan_frequency_hz: u32) -> Self {
        self.scan_frequency_hz = scan_frequency_hz;
        self
    }

    /// Builder: candidate and occlusion layers
    pub fn with_layers(mut self, candidate_layers: LayerMask, occlusion_layers: LayerMask) -> Self {
        self.candidate_layers = candidate_layers;
        self.occlusion_layers = occlusion_layers;
        self
    }
}

impl Config for SensorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.check().map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = SensorConfig::default();
        assert!(config.check().is_ok());
        assert_relative_eq!(config.scan_interval(), 1.0 / 30.0);
        assert_relative_eq!(config.eye_height(), 1.6);
    }

    #[test]
    fn test_rejects_non_positive_range() {
        let err = SensorConfig::default().with_range(0.0).check().unwrap_err();
        assert!(matches!(err, SensorError::Configuration { field: "max_range", .. }));
    }

    #[test]
    fn test_rejects_angle_outside_range() {
        assert!(SensorConfig::default().with_half_angle(180.5).check().is_err());
        assert!(SensorConfig::default().with_half_angle(-1.0).check().is_err());
        assert!(SensorConfig::default().with_half_angle(f32::NAN).check().is_err());
        assert!(SensorConfig::default().with_half_angle(180.0).check().is_ok());
        assert!(SensorConfig::default().with_half_angle(0.0).check().is_ok());
    }

    #[test]
    fn test_rejects_zero_frequency() {
        let err = SensorConfig::default().with_frequency(0).check().unwrap_err();
        assert!(matches!(err, SensorError::Configuration { field: "scan_frequency_hz", .. }));
    }

    #[test]
    fn test_rejects_negative_height() {
        assert!(SensorConfig::default().with_height(-0.1).check().is_err());
        assert!(SensorConfig::default().with_height(0.0).check().is_ok());
    }

    #[test]
    fn test_parses_partial_ron_with_defaults() {
        let config: SensorConfig = ron::from_str(
            r#"(max_range: 25.0, half_angle_degrees: 60.0, candidate_layers: "ENEMY | PLAYER")"#,
        )
        .unwrap();

        assert_eq!(config.max_range, 25.0);
        assert_eq!(config.half_angle_degrees, 60.0);
        assert_eq!(config.candidate_layers, LayerMask::ENEMY | LayerMask::PLAYER);
        assert_eq!(config.scan_frequency_hz, 30);
    }

    #[test]
    fn test_invalid_file_contents_fail_validation() {
        let path = std::env::temp_dir().join(format!("vision_sensor_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "max_range = -3.0\n").unwrap();

        let result = SensorConfig::load_from_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
