//! Walkable path network and route finding.
//!
//! [`PathGraph::build`] turns the garden's path polylines into an undirected
//! graph of nodes sampled along every segment and at crossings between
//! different paths. [`find_path`] runs A* over it.

pub mod config;
pub mod graph;
pub mod pathfinding;

pub use config::NavConfig;
pub use graph::{PathGraph, PathNode, PositionKey};
pub use pathfinding::{find_path, route_length};
