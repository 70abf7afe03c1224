//! Side table of scene resources owned by each garden element.
//!
//! Bed meshes are tagged with their bed id for hit-testing and highlighting.
//! Every top-level element node is listed so a rebuild or dispose can remove
//! exactly what was built.

use std::collections::{BTreeMap, HashMap};

use super::node::SceneNodeId;

/// Kind of top-level element in the garden scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Ground,
    Bed,
    Fence,
    Netting,
    Path,
    Plant,
    Character,
}

/// Maps element ids to the scene nodes they own.
#[derive(Clone, Debug, Default)]
pub struct ResourceRegistry {
    /// Top-level element roots, removed as whole subtrees on teardown.
    elements: Vec<(ElementKind, SceneNodeId)>,
    /// Bed id -> every mesh node belonging to that bed.
    bed_meshes: BTreeMap<String, Vec<SceneNodeId>>,
    /// Reverse of `bed_meshes`.
    mesh_owner: HashMap<SceneNodeId, String>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a top-level element root.
    pub fn register_element(&mut self, kind: ElementKind, root: SceneNodeId) {
        self.elements.push((kind, root));
    }

    /// Tag a mesh node with the bed it belongs to.
    pub fn tag_bed_mesh(&mut self, bed_id: &str, node: SceneNodeId) {
        self.bed_meshes.entry(bed_id.to_string()).or_default().push(node);
        self.mesh_owner.insert(node, bed_id.to_string());
    }

    /// Mesh nodes of a bed (empty for unknown ids).
    pub fn bed_meshes(&self, bed_id: &str) -> &[SceneNodeId] {
        self.bed_meshes.get(bed_id).map_or(&[], Vec::as_slice)
    }

    /// Bed owning a mesh node.
    pub fn bed_for_mesh(&self, node: SceneNodeId) -> Option<&str> {
        self.mesh_owner.get(&node).map(String::as_str)
    }

    pub fn bed_ids(&self) -> impl Iterator<Item = &str> {
        self.bed_meshes.keys().map(String::as_str)
    }

    pub fn has_bed(&self, bed_id: &str) -> bool {
        self.bed_meshes.contains_key(bed_id)
    }

    /// Every bed-tagged mesh node.
    pub fn all_bed_meshes(&self) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.bed_meshes.values().flatten().copied()
    }

    /// Element roots of one kind.
    pub fn elements(&self, kind: ElementKind) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.elements
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, id)| *id)
    }

    /// Number of registered element roots.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Empty the table, returning the element roots to remove.
    pub fn drain(&mut self) -> Vec<SceneNodeId> {
        self.bed_meshes.clear();
        self.mesh_owner.clear();
        self.elements.drain(..).map(|(_, id)| id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.bed_meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagging_round_trip() {
        let mut registry = ResourceRegistry::new();
        registry.tag_bed_mesh("bed-1", SceneNodeId(3));
        registry.tag_bed_mesh("bed-1", SceneNodeId(4));
        registry.tag_bed_mesh("bed-2", SceneNodeId(7));

        assert_eq!(registry.bed_meshes("bed-1"), &[SceneNodeId(3), SceneNodeId(4)]);
        assert_eq!(registry.bed_for_mesh(SceneNodeId(7)), Some("bed-2"));
        assert!(registry.bed_meshes("nope").is_empty());
        assert_eq!(registry.all_bed_meshes().count(), 3);
        assert_eq!(registry.bed_ids().collect::<Vec<_>>(), vec!["bed-1", "bed-2"]);
    }

    #[test]
    fn test_drain_empties_everything() {
        let mut registry = ResourceRegistry::new();
        registry.register_element(ElementKind::Ground, SceneNodeId(1));
        registry.register_element(ElementKind::Bed, SceneNodeId(2));
        registry.tag_bed_mesh("bed-1", SceneNodeId(5));

        let roots = registry.drain();
        assert_eq!(roots, vec![SceneNodeId(1), SceneNodeId(2)]);
        assert!(registry.is_empty());
        assert!(registry.bed_for_mesh(SceneNodeId(5)).is_none());
    }

    #[test]
    fn test_elements_by_kind() {
        let mut registry = ResourceRegistry::new();
        registry.register_element(ElementKind::Path, SceneNodeId(1));
        registry.register_element(ElementKind::Bed, SceneNodeId(2));
        registry.register_element(ElementKind::Path, SceneNodeId(3));
        assert_eq!(registry.elements(ElementKind::Path).count(), 2);
        assert_eq!(registry.element_count(), 3);
    }
}
