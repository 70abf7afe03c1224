//! Wandering farmer character
//!
//! The farmer walks the garden's path graph: it picks a random node, asks
//! the pathfinder for a route and follows the waypoints, turning smoothly
//! toward its direction of travel. Its model loads asynchronously and the
//! farmer stays put until it arrives.

pub mod asset;
pub mod config;
pub mod farmer;
pub mod motion;
pub mod rng;

pub use asset::{load_character, AssetSlot, CharacterAsset, WalkCycle};
pub use config::CharacterConfig;
pub use farmer::Farmer;
pub use motion::{normalize_angle, step_toward, MotionController, MotionState};
pub use rng::{goal_rng, GoalRng, SequenceRng};
