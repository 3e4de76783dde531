//! Render settings exposed to the host.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CameraSettings, ScenePreset};

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value {value} for {field}: {reason}")]
    Invalid {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Largest accepted value for the sampling and portion counts.
const MAX_COUNT: u32 = 100;

/// Everything a host configures before rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Render in this many row bands; `None` renders one scanline at a time
    pub portions: Option<u32>,
    /// Fixed seed for reproducible renders; `None` picks a random one
    pub seed: Option<u64>,
    /// Apply gamma 2 before quantizing
    pub gamma_correct: bool,
    pub scene: ScenePreset,
    /// Overrides the scene preset's camera
    pub camera: Option<CameraSettings>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 375,
            samples_per_pixel: 2,
            max_depth: 2,
            portions: None,
            seed: Some(crate::DEFAULT_SEED),
            gamma_correct: false,
            scene: ScenePreset::default(),
            camera: None,
        }
    }
}

impl RenderSettings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Check the ranges the render loop relies on.
    pub fn validate(&self) -> SettingsResult<()> {
        check_count("samples_per_pixel", self.samples_per_pixel)?;
        check_count("max_depth", self.max_depth)?;
        if let Some(portions) = self.portions {
            check_count("portions", portions)?;
        }
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The camera to render with: the explicit one, or the preset's.
    pub fn camera_settings(&self) -> CameraSettings {
        self.camera
            .clone()
            .unwrap_or_else(|| self.scene.camera_settings())
    }
}

fn check_count(field: &'static str, value: u32) -> SettingsResult<()> {
    if (1..=MAX_COUNT).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            value: i64::from(value),
            reason: "must be between 1 and 100",
        })
    }
}

fn check_dimension(field: &'static str, value: u32) -> SettingsResult<()> {
    if value == 0 {
        Err(SettingsError::Invalid {
            field,
            value: 0,
            reason: "must be at least 1 pixel",
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RenderSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.samples_per_pixel, 2);
        assert_eq!(settings.portions, None);
        assert!((settings.aspect_ratio() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = RenderSettings::from_json_str(
            r#"{ "width": 64, "height": 32, "samples_per_pixel": 10, "scene": "three-spheres" }"#,
        )
        .unwrap();

        assert_eq!(settings.width, 64);
        assert_eq!(settings.samples_per_pixel, 10);
        assert_eq!(settings.max_depth, 2);
        assert_eq!(settings.scene, ScenePreset::ThreeSpheres);
        assert_eq!(settings.seed, Some(crate::DEFAULT_SEED));
    }

    #[test]
    fn test_camera_override() {
        let settings = RenderSettings::from_json_str(
            r#"{ "camera": { "look_from": [1.0, 2.0, 3.0], "vfov": 30.0 } }"#,
        )
        .unwrap();

        let camera = settings.camera_settings();
        assert_eq!(camera.look_from, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(camera.vfov, 30.0);
        // Unset fields keep camera defaults
        assert_eq!(camera.vup, Vec3::Y);
    }

    #[test]
    fn test_rejects_out_of_range_counts() {
        for json in [
            r#"{ "samples_per_pixel": 0 }"#,
            r#"{ "max_depth": 101 }"#,
            r#"{ "portions": 0 }"#,
            r#"{ "width": 0 }"#,
        ] {
            let err = RenderSettings::from_json_str(json).unwrap_err();
            assert!(matches!(err, SettingsError::Invalid { .. }), "{json}: {err}");
        }
    }

    #[test]
    fn test_portions_from_json() {
        let settings = RenderSettings::from_json_str(r#"{ "portions": 5 }"#).unwrap();
        assert_eq!(settings.portions, Some(5));

        let settings = RenderSettings::from_json_str(r#"{ "portions": null }"#).unwrap();
        assert_eq!(settings.portions, None);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = RenderSettings::from_json_str("{ width: ").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RenderSettings::load("/nonexistent/ghd/settings.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = RenderSettings {
            seed: None,
            scene: ScenePreset::MotionBlur,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(RenderSettings::from_json_str(&json).unwrap(), settings);
    }
}
