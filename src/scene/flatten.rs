//! Flattened scene graph output for the renderer.
//!
//! `RenderItem` is the result of walking the scene graph: one entry per
//! visible mesh or model, with its world transform resolved.

use std::sync::Arc;

use glam::Mat4;

use crate::geometry::Mesh;

use super::node::{Layer, Material, SceneNodeId};

/// What to draw for one item.
#[derive(Clone, Debug)]
pub enum RenderContent {
    Mesh { mesh: Arc<Mesh>, material: Material },
    Model { asset: String, clip_phase: f32 },
}

/// One entry in the flattened visible set.
#[derive(Clone, Debug)]
pub struct RenderItem {
    pub node: SceneNodeId,
    pub world_transform: Mat4,
    pub layer: Layer,
    pub content: RenderContent,
}

impl RenderItem {
    pub fn material(&self) -> Option<&Material> {
        match &self.content {
            RenderContent::Mesh { material, .. } => Some(material),
            RenderContent::Model { .. } => None,
        }
    }
}

/// Total triangles across mesh items.
pub fn triangle_count(items: &[RenderItem]) -> usize {
    items
        .iter()
        .map(|item| match &item.content {
            RenderContent::Mesh { mesh, .. } => mesh.triangle_count(),
            RenderContent::Model { .. } => 0,
        })
        .sum()
}
