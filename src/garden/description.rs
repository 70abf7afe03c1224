//! Serde types for garden descriptions.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{color_from_hex, Color};
use crate::core::Result;

/// Point in layout space (feet from the garden's corner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f32,
    pub z: f32,
}

/// Path vertex; `y` is an optional height above the ground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    pub z: f32,
}

/// Whole garden.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GardenDescription {
    /// Extent along X in feet.
    pub width: f32,
    /// Extent along Z in feet.
    pub length: f32,
    #[serde(default)]
    pub beds: Vec<Bed>,
    #[serde(default)]
    pub paths: Vec<GardenPath>,
    #[serde(default)]
    pub fence: Option<Fence>,
    #[serde(default)]
    pub bird_netting: Option<BirdNetting>,
    /// `#rrggbb` ground colour.
    #[serde(default = "default_ground_color")]
    pub ground_color: String,
    /// Plants placed directly in the garden, positions in layout space.
    #[serde(default)]
    pub scattered_plants: Vec<Plant>,
}

fn default_ground_color() -> String {
    "#6b8e3d".to_string()
}

/// Bed frame material; selects the frame geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameMaterial {
    #[default]
    GalvanizedMetal,
    Cedar,
    Pine,
    ConcreteBlock,
    None,
}

/// A raised bed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bed {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Centre of the bed in layout space.
    pub position: LayoutPoint,
    pub width: f32,
    pub length: f32,
    pub height: f32,
    #[serde(default)]
    pub frame_material: FrameMaterial,
    #[serde(default)]
    pub plants: Vec<Plant>,
}

/// Plant kinds, one generator each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    Flower,
    Shrub,
    Tree,
    Vegetable,
    Herb,
    Grass,
}

/// A plant, positioned relative to its bed's centre (or in layout space
/// when scattered).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    pub position: LayoutPoint,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_plant_color")]
    pub color: String,
}

fn default_scale() -> f32 {
    1.0
}

fn default_plant_color() -> String {
    "#3f8f3a".to_string()
}

impl Plant {
    /// Parsed colour, falling back to leaf green.
    pub fn rgb(&self) -> Color {
        color_from_hex(&self.color).unwrap_or([0.25, 0.56, 0.23])
    }
}

/// Surface of a garden path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMaterial {
    #[default]
    Gravel,
    Mulch,
    Stone,
    Brick,
    Grass,
    Dirt,
}

/// A walkable garden path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GardenPath {
    pub id: String,
    pub points: Vec<PathPoint>,
    #[serde(default = "default_path_width")]
    pub width: f32,
    #[serde(default)]
    pub material: PathMaterial,
}

fn default_path_width() -> f32 {
    3.0
}

/// Side of the perimeter fence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceSide {
    North,
    South,
    East,
    West,
}

/// Opening in the fence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub side: FenceSide,
    /// Distance from the side's start corner to the gate's centre (feet).
    pub offset: f32,
    #[serde(default = "default_gate_width")]
    pub width: f32,
}

fn default_gate_width() -> f32 {
    4.0
}

/// Perimeter fence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fence {
    pub height: f32,
    #[serde(default)]
    pub gates: Vec<Gate>,
}

/// Bird netting tented over the garden.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BirdNetting {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ridge height at the support posts (feet).
    pub height: f32,
    /// Support posts in layout space.
    #[serde(default)]
    pub support_posts: Vec<LayoutPoint>,
    /// Cable sag as a fraction of span.
    #[serde(default = "default_sag")]
    pub sag: f32,
}

fn default_true() -> bool {
    true
}

fn default_sag() -> f32 {
    0.04
}

impl GardenDescription {
    /// Empty garden of the given size.
    pub fn new(width: f32, length: f32) -> Self {
        Self {
            width,
            length,
            beds: Vec::new(),
            paths: Vec::new(),
            fence: None,
            bird_netting: None,
            ground_color: default_ground_color(),
            scattered_plants: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Layout position to world position (garden centred on the origin).
    pub fn to_world(&self, x: f32, z: f32) -> Vec3 {
        Vec3::new(x - self.width * 0.5, 0.0, z - self.length * 0.5)
    }

    /// Path polylines in world space, one per path.
    pub fn path_polylines(&self) -> Vec<Vec<Vec3>> {
        self.paths
            .iter()
            .map(|path| {
                path.points
                    .iter()
                    .map(|p| self.to_world(p.x, p.z) + Vec3::Y * p.y)
                    .collect()
            })
            .collect()
    }

    /// Parsed ground colour, falling back to grass green.
    pub fn ground_rgb(&self) -> Color {
        color_from_hex(&self.ground_color).unwrap_or([0.42, 0.56, 0.24])
    }

    /// Whether netting should be built.
    pub fn netting(&self) -> Option<&BirdNetting> {
        self.bird_netting.as_ref().filter(|n| n.enabled)
    }
}
