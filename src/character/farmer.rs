//! The farmer: motion controller plus the model it walks with.

use glam::{Mat4, Quat, Vec3};

use crate::nav::PathGraph;

use super::asset::{CharacterAsset, WalkCycle};
use super::config::CharacterConfig;
use super::motion::{MotionController, MotionState};
use super::rng::{goal_rng, GoalRng};

/// A character wandering the path graph.
///
/// The owning scene loads the model and hands it over with
/// [`set_asset`](Self::set_asset); until then the farmer stands still.
pub struct Farmer {
    motion: MotionController,
    asset: Option<CharacterAsset>,
    walk: WalkCycle,
    disposed: bool,
}

impl Farmer {
    /// Farmer with the production random source from `config.seed`.
    pub fn new(config: CharacterConfig) -> Self {
        let rng = goal_rng(config.seed);
        Self::with_rng(config, rng)
    }

    /// Farmer with an injected random source.
    pub fn with_rng(config: CharacterConfig, rng: Box<dyn GoalRng>) -> Self {
        Self {
            motion: MotionController::new(config, rng),
            asset: None,
            walk: WalkCycle::default(),
            disposed: false,
        }
    }

    /// Give the farmer its loaded model. Ignored after [`dispose`](Self::dispose).
    pub fn set_asset(&mut self, asset: CharacterAsset) {
        if !self.disposed {
            self.asset = Some(asset);
        }
    }

    /// Drop to a random node of `graph`.
    pub fn place(&mut self, graph: &PathGraph) {
        self.motion.place(graph);
        self.walk.stop();
    }

    /// Advance one frame. Returns whether the farmer moved.
    ///
    /// Nothing moves until the model is set, and nothing happens at all
    /// after [`dispose`](Self::dispose).
    pub fn tick(&mut self, dt: f32, graph: &PathGraph) -> bool {
        if self.disposed {
            return false;
        }
        let Some(duration) = self.asset.as_ref().map(|a| a.walk_clip_duration) else {
            return false;
        };

        let moved = self.motion.tick(dt, graph);
        if moved > 0.0 {
            let rate = self.motion.config().walk_clip_rate;
            self.walk.set_speed(moved / dt.max(f32::EPSILON) * rate);
            self.walk.play();
            self.walk.advance(dt, duration);
        } else if self.motion.state() == MotionState::Idle {
            self.walk.pause();
        }
        moved > 0.0
    }

    /// Detach the farmer. The model is released and later ticks are no-ops.
    pub fn dispose(&mut self) {
        self.asset = None;
        self.walk.stop();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Model, once set.
    pub fn asset(&self) -> Option<&CharacterAsset> {
        self.asset.as_ref()
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn walk(&self) -> &WalkCycle {
        &self.walk
    }

    /// Position in the walk clip, `[0, 1)`. Zero without a model.
    pub fn clip_phase(&self) -> f32 {
        self.asset
            .as_ref()
            .map_or(0.0, |a| self.walk.phase(a.walk_clip_duration))
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position()
    }

    /// Model matrix from position, heading and model scale.
    pub fn transform(&self) -> Mat4 {
        let scale = self.asset().map_or(1.0, |a| a.scale);
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_rotation_y(self.motion.heading()),
            self.motion.position(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::SequenceRng;
    use crate::nav::NavConfig;

    fn graph() -> PathGraph {
        PathGraph::build(
            &[vec![Vec3::ZERO, Vec3::new(12.0, 0.0, 0.0)]],
            &NavConfig::default(),
        )
    }

    fn farmer() -> Farmer {
        Farmer::with_rng(CharacterConfig::default(), Box::new(SequenceRng::new(vec![0, 4])))
    }

    #[test]
    fn test_waits_for_asset() {
        let graph = graph();
        let mut farmer = farmer();
        farmer.place(&graph);
        for _ in 0..5 {
            assert!(!farmer.tick(0.1, &graph));
        }
        assert_eq!(farmer.motion().state(), MotionState::Idle);
        assert_eq!(farmer.position(), Vec3::ZERO);

        farmer.set_asset(CharacterAsset::new("farmer"));
        farmer.tick(0.1, &graph);
        assert_eq!(farmer.motion().state(), MotionState::Traveling);
    }

    #[test]
    fn test_walk_clip_plays_while_moving() {
        let graph = graph();
        let mut farmer = farmer();
        farmer.place(&graph);
        assert_eq!(farmer.clip_phase(), 0.0);
        farmer.set_asset(CharacterAsset::new("farmer"));
        for _ in 0..5 {
            farmer.tick(0.1, &graph);
        }
        assert!(farmer.walk().playing);
        assert!(farmer.position().x > 0.0);
        let phase = farmer.clip_phase();
        assert!(phase > 0.0 && phase < 1.0, "phase {phase}");
    }

    #[test]
    fn test_dispose_releases_model() {
        let graph = graph();
        let mut farmer = farmer();
        farmer.place(&graph);
        farmer.set_asset(CharacterAsset::new("farmer"));
        farmer.dispose();
        assert!(farmer.asset().is_none());
        farmer.set_asset(CharacterAsset::new("farmer"));
        assert!(!farmer.tick(0.1, &graph));
        assert!(farmer.asset().is_none());
        assert!(farmer.is_disposed());
    }
}
