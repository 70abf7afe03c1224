//! Geometry builders for each kind of garden element.
//!
//! Builders are pure: they turn a piece of the garden description into
//! [`Part`]s, meshes already placed relative to their element. The composer
//! decides where the parts go in the scene graph.

pub mod beds;
pub mod fence;
pub mod ground;
pub mod netting;
pub mod paths;
pub mod plants;

use crate::geometry::Mesh;

use super::node::Material;

/// One mesh ready to be inserted into the scene graph.
#[derive(Clone, Debug)]
pub struct Part {
    pub name: String,
    pub mesh: Mesh,
    pub material: Material,
}

impl Part {
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
        }
    }
}
