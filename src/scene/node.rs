//! Scene graph node types
//!
//! Node IDs, transforms, render layers, materials and content variants.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::core::types::Color;
use crate::geometry::Mesh;

/// Unique identifier for a scene graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneNodeId(pub u64);

/// Local transform relative to the parent node.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl LocalTransform {
    /// Identity transform (no translation, rotation, or scaling).
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a translation-only transform.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }
}

/// Render layer; whole layers can be hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Ground,
    Paths,
    Beds,
    Structures,
    Plants,
    Character,
}

/// Surface appearance of a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Base colour, also the fallback when the texture is unavailable.
    pub color: Color,
    /// Texture name known to the host, if one is used.
    pub texture: Option<String>,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opacity: f32,
    pub double_sided: bool,
}

impl Material {
    /// Opaque, rough, untextured material.
    pub fn flat(color: Color) -> Self {
        Self {
            color,
            texture: None,
            emissive: [0.0; 3],
            emissive_intensity: 0.0,
            roughness: 0.9,
            metalness: 0.0,
            opacity: 1.0,
            double_sided: false,
        }
    }

    pub fn with_roughness(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.double_sided = true;
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}

/// What a scene node contains.
#[derive(Clone, Debug)]
pub enum NodeContent {
    /// A grouping node with no geometry of its own.
    Group,

    /// Generated geometry with its material.
    Mesh { mesh: Arc<Mesh>, material: Material },

    /// An externally loaded model, drawn by the host at this node's transform.
    /// `clip_phase` is the position in its looping walk clip, `[0, 1)`.
    Model { asset: String, clip_phase: f32 },
}

/// A single node in the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub id: SceneNodeId,
    pub name: String,
    pub parent: Option<SceneNodeId>,
    pub children: Vec<SceneNodeId>,
    pub local_transform: LocalTransform,
    /// Cached world transform (recomputed during propagation).
    pub world_transform: Mat4,
    pub layer: Layer,
    pub content: NodeContent,
}

impl SceneNode {
    /// Create a new scene node.
    pub fn new(id: SceneNodeId, name: impl Into<String>, layer: Layer, content: NodeContent) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            children: Vec::new(),
            local_transform: LocalTransform::identity(),
            world_transform: Mat4::IDENTITY,
            layer,
            content,
        }
    }

    /// Material of a mesh node.
    pub fn material(&self) -> Option<&Material> {
        match &self.content {
            NodeContent::Mesh { material, .. } => Some(material),
            _ => None,
        }
    }

    /// Mesh of a mesh node.
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        match &self.content {
            NodeContent::Mesh { mesh, .. } => Some(mesh),
            _ => None,
        }
    }
}
