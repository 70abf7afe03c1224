//! Mathematical utilities and data structures

pub mod aabb;
pub mod ray;
pub mod segment;

pub use aabb::Aabb;
pub use ray::Ray;
pub use segment::{segment_intersection, INTERIOR_MARGIN, PARALLEL_EPSILON};
