//! Garden scene: graph, builders and the composer that ties them together

pub mod builders;
pub mod composer;
pub mod config;
pub mod flatten;
pub mod graph;
pub mod highlight;
pub mod materials;
pub mod node;
pub mod registry;

pub use composer::GardenScene;
pub use config::{GroundConfig, HighlightConfig, SceneConfig, StructureConfig};
pub use flatten::{triangle_count, RenderContent, RenderItem};
pub use graph::SceneGraph;
pub use highlight::{Glow, HighlightState};
pub use node::{Layer, LocalTransform, Material, NodeContent, SceneNode, SceneNodeId};
pub use registry::{ElementKind, ResourceRegistry};
