//! Configuration loader - YAML growth parameters + .env settings

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::camera::{self, ZoomPacing, ZoomParams};
use crate::growth::DEFAULT_INTERVAL_MS;
use crate::pool::{DEFAULT_CAPACITY, MAX_CAPACITY};
use crate::spiral::{self, SpiralShape};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Growth and camera parameters, loaded from spiral.yaml.
/// Every field falls back to the compiled-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub interval_ms: u64,
    pub angle_increment: f64,
    pub radius_increment: f64,
    pub height_increment: f64,
    /// Nominal outer radius of the spiral; zoom must begin inside it
    pub max_radius: f64,
    pub zoom_start_threshold: f32,
    pub zoom_speed: f32,
    pub camera_z_base: f32,
    pub min_fov_degrees: f32,
    pub initial_fov_degrees: f32,
    pub capacity: usize,
    pub zoom_pacing: ZoomPacing,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            angle_increment: spiral::ANGLE_INCREMENT,
            radius_increment: spiral::RADIUS_INCREMENT,
            height_increment: spiral::HEIGHT_INCREMENT,
            max_radius: 1.0,
            zoom_start_threshold: camera::ZOOM_START_THRESHOLD,
            zoom_speed: camera::ZOOM_SPEED,
            camera_z_base: camera::CAMERA_Z_BASE,
            min_fov_degrees: camera::MIN_FOV_DEGREES,
            initial_fov_degrees: camera::INITIAL_FOV_DEGREES,
            capacity: DEFAULT_CAPACITY,
            zoom_pacing: ZoomPacing::PerFrame,
        }
    }
}

impl SpiralConfig {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: SpiralConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.interval_ms == 0 {
            return Err(invalid("interval_ms", "must be greater than 0"));
        }
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(invalid(
                "capacity",
                format!("{} must be in 1..={}", self.capacity, MAX_CAPACITY),
            ));
        }

        let finite = [
            ("angle_increment", self.angle_increment),
            ("radius_increment", self.radius_increment),
            ("height_increment", self.height_increment),
            ("max_radius", self.max_radius),
            ("zoom_start_threshold", self.zoom_start_threshold as f64),
            ("zoom_speed", self.zoom_speed as f64),
            ("camera_z_base", self.camera_z_base as f64),
            ("min_fov_degrees", self.min_fov_degrees as f64),
            ("initial_fov_degrees", self.initial_fov_degrees as f64),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, format!("{} is not finite", value)));
            }
        }
        if self.radius_increment < 0.0 || self.height_increment < 0.0 {
            return Err(invalid(
                "radius_increment",
                "radius and height increments must not be negative",
            ));
        }

        if self.camera_z_base <= 0.0 {
            return Err(invalid("camera_z_base", "must be greater than 0"));
        }
        if self.zoom_speed < 0.0 {
            return Err(invalid("zoom_speed", "must not be negative"));
        }
        if self.min_fov_degrees <= 0.0 || self.min_fov_degrees > self.initial_fov_degrees {
            return Err(invalid(
                "min_fov_degrees",
                format!(
                    "{} must be in (0, initial_fov_degrees = {}]",
                    self.min_fov_degrees, self.initial_fov_degrees
                ),
            ));
        }
        if self.initial_fov_degrees >= 180.0 {
            return Err(invalid("initial_fov_degrees", "must be below 180"));
        }
        if self.zoom_start_threshold as f64 >= self.max_radius {
            return Err(invalid(
                "zoom_start_threshold",
                format!("{} must be below max_radius {}", self.zoom_start_threshold, self.max_radius),
            ));
        }
        if let ZoomPacing::TimeScaled { reference_fps } = self.zoom_pacing {
            if !(reference_fps > 0.0) {
                return Err(invalid("zoom_pacing.reference_fps", "must be greater than 0"));
            }
        }

        Ok(())
    }

    pub fn shape(&self) -> SpiralShape {
        SpiralShape {
            angle_increment: self.angle_increment,
            radius_increment: self.radius_increment,
            height_increment: self.height_increment,
        }
    }

    pub fn zoom(&self) -> ZoomParams {
        ZoomParams {
            start_threshold: self.zoom_start_threshold,
            speed: self.zoom_speed,
            z_base: self.camera_z_base,
            min_fov_degrees: self.min_fov_degrees,
            initial_fov_degrees: self.initial_fov_degrees,
            pacing: self.zoom_pacing,
        }
    }
}

/// Process settings loaded from .env
#[derive(Debug, Clone)]
pub struct Env {
    pub log_dir: String,
}

impl Env {
    /// Load settings from .env file and the environment
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        Env {
            log_dir: std::env::var("SPIRAL_LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SpiralConfig::default();
        config.validate().unwrap();
        assert_eq!(config.interval_ms, 50);
        assert_eq!(config.capacity, 10_000);
        assert_eq!(config.shape(), SpiralShape::default());
        assert_eq!(config.zoom(), ZoomParams::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = SpiralConfig::from_yaml("interval_ms: 20\ncapacity: 500\n").unwrap();
        assert_eq!(config.interval_ms, 20);
        assert_eq!(config.capacity, 500);
        assert_eq!(config.zoom_speed, camera::ZOOM_SPEED);
    }

    #[test]
    fn test_zoom_pacing_yaml() {
        let yaml = "zoom_pacing:\n  mode: time_scaled\n  reference_fps: 60.0\n";
        let config = SpiralConfig::from_yaml(yaml).unwrap();
        assert_eq!(
            config.zoom_pacing,
            ZoomPacing::TimeScaled { reference_fps: 60.0 }
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = SpiralConfig::from_yaml("capacity: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "capacity", .. }));

        let err = SpiralConfig::from_yaml("min_fov_degrees: 90.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "min_fov_degrees", .. }));

        let err = SpiralConfig::from_yaml("zoom_start_threshold: 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "zoom_start_threshold", .. }));

        let err = SpiralConfig::from_yaml("camera_z_base: 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "camera_z_base", .. }));

        let err = SpiralConfig::from_yaml("interval_ms: [1, 2]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_oversized_capacity() {
        let err = SpiralConfig::from_yaml("capacity: 18446744073709551615").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "capacity", .. }));

        let yaml = format!("capacity: {}", MAX_CAPACITY + 1);
        assert!(SpiralConfig::from_yaml(&yaml).is_err());

        let yaml = format!("capacity: {}", MAX_CAPACITY);
        assert_eq!(SpiralConfig::from_yaml(&yaml).unwrap().capacity, MAX_CAPACITY);
    }

    #[test]
    fn test_rejects_non_finite_values() {
        for (yaml, field) in [
            ("zoom_start_threshold: .nan", "zoom_start_threshold"),
            ("camera_z_base: .nan", "camera_z_base"),
            ("camera_z_base: .inf", "camera_z_base"),
            ("max_radius: .nan", "max_radius"),
            ("zoom_speed: .nan", "zoom_speed"),
            ("min_fov_degrees: .nan", "min_fov_degrees"),
            ("initial_fov_degrees: .inf", "initial_fov_degrees"),
            ("radius_increment: .nan", "radius_increment"),
        ] {
            match SpiralConfig::from_yaml(yaml) {
                Err(ConfigError::Invalid { field: f, .. }) => assert_eq!(f, field, "{}", yaml),
                other => panic!("{} was accepted: {:?}", yaml, other),
            }
        }
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = serde_yaml::to_string(&SpiralConfig::default()).unwrap();
        assert_eq!(SpiralConfig::from_yaml(&yaml).unwrap(), SpiralConfig::default());
    }
}
