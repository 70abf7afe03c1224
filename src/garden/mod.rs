//! Garden layout description
//!
//! The declarative input the scene is built from. Layout coordinates are in
//! feet with the origin at the garden's corner; the scene centres the garden
//! on the world origin (see [`GardenDescription::to_world`]).

pub mod description;

pub use description::{
    Bed, BirdNetting, FenceSide, Fence, FrameMaterial, GardenDescription, Gate, PathMaterial,
    GardenPath, LayoutPoint, PathPoint, Plant, PlantType,
};
