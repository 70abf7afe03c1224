//! Scene graph: CPU-side hierarchy of nodes.
//!
//! Every garden element (bed, fence, path, plant) is a subtree of owned
//! nodes. Each frame, `flatten()` walks the tree and produces a flat
//! `Vec<RenderItem>` the renderer consumes directly.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;

use crate::geometry::Mesh;
use crate::math::Ray;

use super::flatten::{RenderContent, RenderItem};
use super::node::{Layer, LocalTransform, Material, NodeContent, SceneNode, SceneNodeId};

/// CPU-side scene graph that organizes garden content into a hierarchy.
pub struct SceneGraph {
    nodes: HashMap<SceneNodeId, SceneNode>,
    root: SceneNodeId,
    next_id: u64,
    dirty: bool,
}

impl SceneGraph {
    /// Create a new scene graph with a root Group node.
    pub fn new() -> Self {
        let root_id = SceneNodeId(0);
        let root_node = SceneNode::new(root_id, "root", Layer::Ground, NodeContent::Group);

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root_node);

        Self {
            nodes,
            root: root_id,
            next_id: 1,
            dirty: true,
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    fn alloc_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        layer: Layer,
        content: NodeContent,
    ) -> SceneNodeId {
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, layer, content);
        node.parent = Some(parent);

        self.nodes.insert(id, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        self.dirty = true;
        id
    }

    /// Add a mesh node under `parent`.
    pub fn add_mesh(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        layer: Layer,
        mesh: Mesh,
        material: Material,
    ) -> SceneNodeId {
        self.add_child(
            parent,
            name,
            layer,
            NodeContent::Mesh {
                mesh: Arc::new(mesh),
                material,
            },
        )
    }

    /// Remove a node and its entire subtree. Cannot remove the root.
    /// Returns the number of nodes removed.
    pub fn remove(&mut self, id: SceneNodeId) -> usize {
        if id == self.root || !self.nodes.contains_key(&id) {
            return 0;
        }

        // Collect subtree IDs (BFS)
        let mut to_remove = vec![id];
        let mut i = 0;
        while i < to_remove.len() {
            let current = to_remove[i];
            if let Some(node) = self.nodes.get(&current) {
                to_remove.extend_from_slice(&node.children);
            }
            i += 1;
        }

        if let Some(parent_id) = self.nodes.get(&id).and_then(|n| n.parent) {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.children.retain(|c| *c != id);
            }
        }

        let removed = to_remove.len();
        for nid in to_remove {
            self.nodes.remove(&nid);
        }

        self.dirty = true;
        removed
    }

    /// Remove everything except the root.
    pub fn clear(&mut self) {
        let children: Vec<_> = self.children(self.root).collect();
        for child in children {
            self.remove(child);
        }
        self.dirty = true;
    }

    /// Set the local transform of a node.
    pub fn set_transform(&mut self, id: SceneNodeId, transform: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform = transform;
            self.dirty = true;
        }
    }

    /// Change a mesh node's material in place. Returns false for non-mesh nodes.
    pub fn update_material(&mut self, id: SceneNodeId, update: impl FnOnce(&mut Material)) -> bool {
        match self.nodes.get_mut(&id).map(|n| &mut n.content) {
            Some(NodeContent::Mesh { material, .. }) => {
                update(material);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Get an immutable reference to a node.
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node.
    pub fn get_mut(&mut self, id: SceneNodeId) -> Option<&mut SceneNode> {
        self.dirty = true;
        self.nodes.get_mut(&id)
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: SceneNodeId) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether anything changed since the last flatten.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// World transform computed by walking up the parent chain.
    ///
    /// Unlike the cached `world_transform`, this is valid between flattens.
    pub fn world_transform(&self, id: SceneNodeId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(id);
        while let Some(node) = current.and_then(|nid| self.nodes.get(&nid)) {
            matrix = node.local_transform.to_mat4() * matrix;
            current = node.parent;
        }
        matrix
    }

    /// Nearest ray hit among the given mesh nodes: `(node, distance)`.
    pub fn raycast(
        &self,
        ray: &Ray,
        candidates: impl IntoIterator<Item = SceneNodeId>,
    ) -> Option<(SceneNodeId, f32)> {
        candidates
            .into_iter()
            .filter_map(|id| {
                let node = self.nodes.get(&id)?;
                let mesh = node.mesh()?;
                let t = mesh.raycast(ray, &self.world_transform(id))?;
                Some((id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Walk the tree, propagate transforms, and collect all drawable content.
    pub fn flatten(&mut self) -> Vec<RenderItem> {
        self.propagate_transforms(self.root, Mat4::IDENTITY);

        let mut out = Vec::new();
        self.collect_items(self.root, &mut out);
        self.dirty = false;
        out
    }

    /// Recursively propagate world transforms.
    fn propagate_transforms(&mut self, node_id: SceneNodeId, parent_world: Mat4) {
        let (local_mat, children) = match self.nodes.get(&node_id) {
            Some(node) => (node.local_transform.to_mat4(), node.children.clone()),
            None => return,
        };

        let world = parent_world * local_mat;

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.world_transform = world;
        }

        for child_id in children {
            self.propagate_transforms(child_id, world);
        }
    }

    /// Recursively collect render items.
    fn collect_items(&self, node_id: SceneNodeId, out: &mut Vec<RenderItem>) {
        let Some(node) = self.nodes.get(&node_id) else {
            return;
        };

        let content = match &node.content {
            NodeContent::Group => None,
            NodeContent::Mesh { mesh, material } => Some(RenderContent::Mesh {
                mesh: Arc::clone(mesh),
                material: material.clone(),
            }),
            NodeContent::Model { asset, clip_phase } => Some(RenderContent::Model {
                asset: asset.clone(),
                clip_phase: *clip_phase,
            }),
        };
        if let Some(content) = content {
            out.push(RenderItem {
                node: node.id,
                world_transform: node.world_transform,
                layer: node.layer,
                content,
            });
        }

        for &child_id in &node.children {
            self.collect_items(child_id, out);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives;
    use glam::Vec3;

    fn cube() -> Mesh {
        primitives::cuboid(Vec3::ONE)
    }

    fn flat() -> Material {
        Material::flat([0.5; 3])
    }

    #[test]
    fn test_new_scene_graph() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get(graph.root()).unwrap().name, "root");
    }

    #[test]
    fn test_add_child() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let child = graph.add_child(root, "bed", Layer::Beds, NodeContent::Group);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get(child).unwrap().parent, Some(root));
        assert!(graph.children(root).any(|c| c == child));
    }

    #[test]
    fn test_remove_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let parent = graph.add_child(root, "bed", Layer::Beds, NodeContent::Group);
        let soil = graph.add_mesh(parent, "soil", Layer::Beds, cube(), flat());
        let frame = graph.add_child(parent, "frame", Layer::Beds, NodeContent::Group);
        graph.add_mesh(frame, "plank", Layer::Beds, cube(), flat());

        assert_eq!(graph.remove(parent), 4);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.get(soil).is_none());
        assert_eq!(graph.children(root).count(), 0);
    }

    #[test]
    fn test_cannot_remove_root() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        assert_eq!(graph.remove(root), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_clear_keeps_root() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        for i in 0..5 {
            let g = graph.add_child(root, format!("g{i}"), Layer::Plants, NodeContent::Group);
            graph.add_mesh(g, "m", Layer::Plants, cube(), flat());
        }
        graph.clear();
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_flatten_transform_propagation() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let parent = graph.add_child(root, "parent", Layer::Beds, NodeContent::Group);
        graph.set_transform(parent, LocalTransform::from_position(Vec3::new(10.0, 0.0, 0.0)));
        let child = graph.add_mesh(parent, "soil", Layer::Beds, cube(), flat());
        graph.set_transform(child, LocalTransform::from_position(Vec3::new(5.0, 0.0, 0.0)));

        let items = graph.flatten();
        assert_eq!(items.len(), 1);
        let origin = items[0].world_transform.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-4);
        assert_eq!(graph.world_transform(child), items[0].world_transform);
        assert!(!graph.is_dirty());
    }

    #[test]
    fn test_flatten_skips_groups() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let bed = graph.add_child(root, "bed", Layer::Beds, NodeContent::Group);
        graph.add_mesh(bed, "soil", Layer::Beds, cube(), flat());
        graph.add_mesh(root, "fence", Layer::Structures, cube(), flat());
        graph.add_child(root, "farmer", Layer::Character, NodeContent::Model { asset: "farmer".into(), clip_phase: 0.25 });

        let items = graph.flatten();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| item.node != bed));
        assert!(items.iter().any(|item| matches!(
            item.content,
            RenderContent::Model { clip_phase, .. } if clip_phase == 0.25
        )));
    }

    #[test]
    fn test_update_material_marks_dirty() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mesh = graph.add_mesh(root, "a", Layer::Beds, cube(), flat());
        let group = graph.add_child(root, "g", Layer::Beds, NodeContent::Group);
        graph.flatten();

        assert!(graph.update_material(mesh, |m| m.emissive_intensity = 0.5));
        assert!(graph.is_dirty());
        assert_eq!(graph.get(mesh).unwrap().material().unwrap().emissive_intensity, 0.5);
        assert!(!graph.update_material(group, |_| {}));
    }

    #[test]
    fn test_raycast_picks_nearest() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let near = graph.add_mesh(root, "near", Layer::Beds, cube(), flat());
        let far = graph.add_mesh(root, "far", Layer::Beds, cube(), flat());
        graph.set_transform(near, LocalTransform::from_position(Vec3::new(0.0, 0.0, 5.0)));
        graph.set_transform(far, LocalTransform::from_position(Vec3::new(0.0, 0.0, -5.0)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::NEG_Z);
        let (hit, t) = graph.raycast(&ray, [near, far]).unwrap();
        assert_eq!(hit, near);
        assert!((t - 14.5).abs() < 1e-3);

        let miss = Ray::new(Vec3::new(10.0, 0.0, 20.0), Vec3::NEG_Z);
        assert!(graph.raycast(&miss, [near, far]).is_none());
    }
}
