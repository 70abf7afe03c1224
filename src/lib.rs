//! Gardenscape - procedural 3D garden scenes
//!
//! Turns a declarative garden layout into a scene graph of generated meshes
//! (ground, raised beds, fence, bird netting, paths, plants), derives a
//! walkable path graph from the layout's paths, and animates a farmer who
//! wanders that graph. The host drives everything through
//! [`scene::GardenScene`].

pub mod core;
pub mod math;
pub mod geometry;
pub mod terrain;
pub mod nav;
pub mod character;
pub mod atmosphere;
pub mod garden;
pub mod scene;
