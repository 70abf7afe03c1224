//! Procedural geometry synthesis.
//!
//! Turns numeric shape parameters into indexed triangle meshes: primitives
//! for plants and frames, corrugated metal panels, sagging cables and the
//! tented bird-netting surface. Ground and soil displacement live in
//! [`crate::terrain`].

pub mod corrugated;
pub mod mesh;
pub mod primitives;
pub mod sag;

pub use corrugated::{corrugated_panel, corrugation_offset, ripple_count};
pub use mesh::{Mesh, MeshVertex};
pub use sag::{cable_height, cable_points, cable_sag, GroundSegment, NettingSurface};
