//! Sketch configuration.
//!
//! Every tunable of the sketch lives in [`SketchConfig`]. Defaults reproduce
//! the classic look: a 4:3 canvas, a 300 px tall dock in the middle third
//! and a 30 px hit radius. A config can be loaded from JSON; missing fields
//! fall back to their defaults.
//!
//! ```ignore
//! {
//!     "aspect": { "width": 16.0, "height": 9.0 },
//!     "zone_depth": 250.0,
//!     "seed": 7
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sizing::AspectRatio;

/// All tunables for a sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Fixed canvas aspect ratio, or [`AspectRatio::FREE`].
    pub aspect: AspectRatio,
    /// Initial window width in logical pixels.
    pub window_width: u32,
    /// Initial window height in logical pixels.
    pub window_height: u32,
    /// Pixels per second squared for one unit of world gravity.
    pub gravity_scale: f32,
    /// How far down from the top of the canvas the gravity dock reaches.
    pub zone_depth: f32,
    /// Pointer hit-test radius for selecting and fragmenting bodies.
    pub hit_radius: f32,
    /// Max per-axis offset of spawned shapes and fragments.
    pub spawn_spread: f32,
    /// Fragments produced by a double-click.
    pub fragment_count: usize,
    /// Thickness of the four boundary walls.
    pub wall_thickness: f32,
    /// Spring stiffness of the pointer constraint, in (0, 1].
    pub pointer_stiffness: f32,
    /// Max gap between two presses that still counts as a double-click.
    pub double_click_ms: u64,
    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            aspect: AspectRatio::default(),
            window_width: 1280,
            window_height: 720,
            gravity_scale: 1000.0,
            zone_depth: 300.0,
            hit_radius: 30.0,
            spawn_spread: 50.0,
            fragment_count: 5,
            wall_thickness: 100.0,
            pointer_stiffness: 0.2,
            double_click_ms: 300,
            seed: None,
        }
    }
}

impl SketchConfig {
    /// Load a config from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: impl Into<String>) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.into()))
        }

        if self.window_width == 0 || self.window_height == 0 {
            return invalid("window size must be non-zero");
        }
        if !(self.aspect.width >= 0.0 && self.aspect.height >= 0.0) {
            return invalid("aspect ratio components must be >= 0");
        }
        if !self.gravity_scale.is_finite() || self.gravity_scale < 0.0 {
            return invalid("gravity_scale must be finite and >= 0");
        }
        if !self.zone_depth.is_finite() || self.zone_depth < 0.0 {
            return invalid("zone_depth must be finite and >= 0");
        }
        if !(self.hit_radius > 0.0) {
            return invalid("hit_radius must be > 0");
        }
        if !(self.spawn_spread > 0.0) {
            return invalid("spawn_spread must be > 0");
        }
        if !(self.wall_thickness > 0.0) {
            return invalid("wall_thickness must be > 0");
        }
        if !(self.pointer_stiffness > 0.0 && self.pointer_stiffness <= 1.0) {
            return invalid("pointer_stiffness must be in (0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SketchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.zone_depth, 300.0);
        assert_eq!(config.hit_radius, 30.0);
        assert_eq!(config.fragment_count, 5);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "zone_depth": 250.0, "seed": 7 }}"#).unwrap();

        let config = SketchConfig::load(file.path()).unwrap();
        assert_eq!(config.zone_depth, 250.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.hit_radius, 30.0);
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pointer_stiffness": 1.5 }}"#).unwrap();

        match SketchConfig::load(file.path()) {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("pointer_stiffness")),
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(SketchConfig::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SketchConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
