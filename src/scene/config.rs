//! Scene configuration
//!
//! Every sub-config has defaults, so a partial JSON file only needs the
//! values it changes.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::atmosphere::SunConfig;
use crate::character::CharacterConfig;
use crate::core::types::{rgb, Color};
use crate::core::{Error, Result};
use crate::nav::NavConfig;
use crate::terrain::{GroundParams, SoilParams};

/// Configuration for a garden scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub nav: NavConfig,
    pub character: CharacterConfig,
    pub sun: SunConfig,
    pub ground: GroundConfig,
    pub structures: StructureConfig,
    pub highlight: HighlightConfig,
    /// Texture names the host can supply. Anything else falls back to a flat colour.
    pub available_textures: BTreeSet<String>,
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject values the builders cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.nav.position_resolution > 0.0) {
            return Err(Error::Config("nav.position_resolution must be positive".into()));
        }
        if !(self.character.speed >= 0.0) {
            return Err(Error::Config("character.speed must not be negative".into()));
        }
        if !(self.structures.fence_post_spacing > 0.0) {
            return Err(Error::Config("structures.fence_post_spacing must be positive".into()));
        }
        if !(self.ground.cells_per_foot > 0.0) {
            return Err(Error::Config("ground.cells_per_foot must be positive".into()));
        }
        Ok(())
    }

    pub fn has_texture(&self, name: &str) -> bool {
        self.available_textures.contains(name)
    }
}

/// Ground, soil and path surface parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub ground: GroundParams,
    pub soil: SoilParams,
    /// Ground extends this far past the garden on every side (feet).
    pub margin: f32,
    /// Ground grid density.
    pub cells_per_foot: f32,
    /// Height of path ribbons above the ground (feet).
    pub path_lift: f32,
    /// Noise amplitude on path surfaces (feet).
    pub path_roughness: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            ground: GroundParams::default(),
            soil: SoilParams::default(),
            margin: 10.0,
            cells_per_foot: 0.5,
            path_lift: 0.05,
            path_roughness: 0.02,
        }
    }
}

/// Fence, netting and frame geometry parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    /// Maximum distance between fence posts (feet).
    pub fence_post_spacing: f32,
    /// Cable tessellation.
    pub cable_segments: u32,
    /// Netting surface cells per foot.
    pub netting_cells_per_foot: f32,
    /// Corrugation wavelength of galvanized panels (feet).
    pub corrugation_wavelength: f32,
    /// Corrugation depth (feet).
    pub corrugation_depth: f32,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            fence_post_spacing: 8.0,
            cable_segments: 16,
            netting_cells_per_foot: 1.0,
            corrugation_wavelength: 0.22,
            corrugation_depth: 0.04,
        }
    }
}

/// Selection and hover glow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub selected_color: Color,
    pub selected_intensity: f32,
    /// Pulse angular frequency (radians per second).
    pub selected_pulse_rate: f32,
    pub hovered_color: Color,
    pub hovered_intensity: f32,
    pub hovered_pulse_rate: f32,
    /// Relative pulse amplitude (0 = steady glow).
    pub pulse_amplitude: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            selected_color: rgb(0x4CAF50),
            selected_intensity: 0.5,
            selected_pulse_rate: 3.0,
            hovered_color: rgb(0xFFD54F),
            hovered_intensity: 0.25,
            hovered_pulse_rate: 5.0,
            pulse_amplitude: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.nav.node_spacing, 3.0);
        assert_eq!(config.structures.fence_post_spacing, 8.0);
        assert!(config.available_textures.is_empty());
    }

    #[test]
    fn test_partial_json() {
        let config = SceneConfig::from_json_str(
            r#"{ "character": { "seed": 3 }, "available_textures": ["ground", "gravel"] }"#,
        )
        .unwrap();
        assert_eq!(config.character.seed, Some(3));
        assert!(config.has_texture("gravel"));
        assert!(!config.has_texture("brick"));
        assert_eq!(config.sun.latitude, 40.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = SceneConfig::from_json_str(r#"{ "structures": { "fence_post_spacing": 0 } }"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{ "nav": { "node_spacing": 2.0 } }"#).unwrap();
        let config = SceneConfig::load(&path).unwrap();
        assert_eq!(config.nav.node_spacing, 2.0);
    }
}
