//! Character movement parameters.

use serde::{Deserialize, Serialize};

/// Movement and goal-selection settings for the farmer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Walking speed in feet per second.
    pub speed: f32,
    /// Horizontal distance at which a waypoint counts as reached (feet).
    pub arrival_tolerance: f32,
    /// Tolerance for snapping to a graph node at the end of a route (feet).
    pub node_tolerance: f32,
    /// Fraction of the remaining turn applied per tick.
    pub heading_blend: f32,
    /// Random picks allowed before giving up on a goal distinct from the
    /// current node.
    pub goal_attempts: u32,
    /// Seed for goal selection. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Walk clip playback rate per foot per second of movement.
    pub walk_clip_rate: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            arrival_tolerance: 0.5,
            node_tolerance: 0.5,
            heading_blend: 0.15,
            goal_attempts: 10,
            seed: None,
            walk_clip_rate: 1.0 / 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CharacterConfig::default();
        assert_eq!(cfg.speed, 3.0);
        assert_eq!(cfg.arrival_tolerance, 0.5);
        assert_eq!(cfg.heading_blend, 0.15);
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn test_seed_from_json() {
        let cfg: CharacterConfig = serde_json::from_str(r#"{ "seed": 42, "speed": 4.5 }"#).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.speed, 4.5);
        assert_eq!(cfg.goal_attempts, 10);
    }
}
