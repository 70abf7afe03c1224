//! Path graph construction parameters.

use serde::{Deserialize, Serialize};

/// Parameters for building the path graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Distance between regularly sampled nodes along a segment (feet).
    pub node_spacing: f32,
    /// Grid used to merge nodes by position (feet).
    pub position_resolution: f32,
    /// Parametric distance under which two samples on a segment are merged.
    pub merge_epsilon: f32,
    /// Segments shorter than this are skipped as degenerate (feet).
    pub min_segment_length: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            node_spacing: 3.0,
            position_resolution: 0.1,
            merge_epsilon: 0.01,
            min_segment_length: 1e-3,
        }
    }
}
