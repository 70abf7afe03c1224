//! Waypoint following and random goal selection.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::nav::{find_path, PathGraph};

use super::config::CharacterConfig;
use super::rng::GoalRng;

/// What the controller is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    /// No route; a goal is picked on the next tick.
    Idle,
    /// Walking toward `route[route_index]`.
    Traveling,
}

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Move `from` toward `to` by at most `max_step`, never past `to`.
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step.max(0.0) || distance < f32::EPSILON {
        return to;
    }
    from + delta / distance * max_step.max(0.0)
}

/// Drives an actor along routes through the path graph.
pub struct MotionController {
    config: CharacterConfig,
    rng: Box<dyn GoalRng>,
    position: Vec3,
    heading: f32,
    current_node: Option<usize>,
    route: Vec<Vec3>,
    route_index: usize,
    /// Distance covered during the most recent tick.
    last_step: f32,
}

impl MotionController {
    pub fn new(config: CharacterConfig, rng: Box<dyn GoalRng>) -> Self {
        Self {
            config,
            rng,
            position: Vec3::ZERO,
            heading: 0.0,
            current_node: None,
            route: Vec::new(),
            route_index: 0,
            last_step: 0.0,
        }
    }

    /// Place the actor on a random node of `graph` and clear any route.
    ///
    /// Does nothing to the position for an empty graph.
    pub fn place(&mut self, graph: &PathGraph) {
        self.route.clear();
        self.route_index = 0;
        self.current_node = None;
        if graph.is_empty() {
            return;
        }
        let id = self.rng.pick_index(graph.node_count());
        if let Some(position) = graph.position(id) {
            self.position = position;
            self.current_node = Some(id);
        }
    }

    /// Advance by `dt` seconds. Returns the distance moved.
    pub fn tick(&mut self, dt: f32, graph: &PathGraph) -> f32 {
        self.last_step = 0.0;

        if self.route.is_empty() {
            self.pick_goal(graph);
            return 0.0;
        }

        if self.route_index >= self.route.len() {
            self.current_node = graph.node_near(self.position, self.config.node_tolerance);
            self.route.clear();
            self.route_index = 0;
            self.pick_goal(graph);
            return 0.0;
        }

        let target = self.route[self.route_index];
        let here = self.position.xz();
        let there = target.xz();
        let distance = here.distance(there);

        if distance < self.config.arrival_tolerance {
            self.route_index += 1;
            return 0.0;
        }

        let next = step_toward(here, there, self.config.speed * dt.max(0.0));
        let moved = here.distance(next);
        let climb = (target.y - self.position.y) * (moved / distance);
        self.position = Vec3::new(next.x, self.position.y + climb, next.y);

        let direction = there - here;
        let desired = direction.x.atan2(direction.y);
        self.heading = normalize_angle(
            self.heading + normalize_angle(desired - self.heading) * self.config.heading_blend,
        );

        self.last_step = moved;
        moved
    }

    /// Choose a random node other than the current one and route to it.
    ///
    /// Leaves the controller idle when the graph is empty, no distinct node
    /// turned up within the attempt budget, or the goal is unreachable.
    pub fn pick_goal(&mut self, graph: &PathGraph) {
        if graph.is_empty() {
            return;
        }
        let Some(current) = self
            .current_node
            .filter(|&id| id < graph.node_count())
            .or_else(|| graph.nearest_node(self.position))
        else {
            return;
        };
        self.current_node = Some(current);

        let mut goal = None;
        for _ in 0..self.config.goal_attempts.max(1) {
            let pick = self.rng.pick_index(graph.node_count());
            if pick != current {
                goal = Some(pick);
                break;
            }
        }
        let Some(goal) = goal else {
            log::trace!("No goal distinct from node {} found", current);
            return;
        };

        let route = find_path(graph, current, goal);
        if route.is_empty() {
            log::debug!("Goal {} unreachable from {}, retrying next tick", goal, current);
            return;
        }
        self.route = route.iter().filter_map(|&id| graph.position(id)).collect();
        self.route_index = 0;
        log::trace!("Walking {} -> {} via {} nodes", current, goal, self.route.len());
    }

    pub fn state(&self) -> MotionState {
        if self.route.is_empty() {
            MotionState::Idle
        } else {
            MotionState::Traveling
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// Last graph node the actor reached.
    #[inline]
    pub fn current_node(&self) -> Option<usize> {
        self.current_node
    }

    /// Remaining waypoints, including the one being walked to.
    pub fn remaining_route(&self) -> &[Vec3] {
        self.route.get(self.route_index..).unwrap_or(&[])
    }

    /// Whole current route.
    pub fn route(&self) -> &[Vec3] {
        &self.route
    }

    /// Distance moved on the most recent tick.
    #[inline]
    pub fn last_step(&self) -> f32 {
        self.last_step
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::SequenceRng;
    use crate::nav::NavConfig;

    fn straight_graph() -> PathGraph {
        PathGraph::build(
            &[vec![Vec3::ZERO, Vec3::new(20.0, 0.0, 0.0)]],
            &NavConfig::default(),
        )
    }

    fn controller(sequence: Vec<usize>) -> MotionController {
        MotionController::new(CharacterConfig::default(), Box::new(SequenceRng::new(sequence)))
    }

    #[test]
    fn test_step_never_overshoots() {
        let from = Vec2::ZERO;
        let to = Vec2::new(10.0, 0.0);
        // 3 ft/s for 5 s would be 15 ft
        let next = step_toward(from, to, 3.0 * 5.0);
        assert!(from.distance(next) <= 10.0 + 1e-6);
        assert_eq!(next, to);

        let partial = step_toward(from, to, 3.0);
        assert!((partial.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_tick_stops_on_waypoint() {
        let mut graph = PathGraph::new(0.1);
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        graph.connect(a, b);
        let mut motion = controller(vec![a, b]);
        motion.place(&graph);
        motion.tick(0.1, &graph); // pick goal
        motion.tick(0.1, &graph); // already on the first waypoint

        // 3 ft/s for 5 s would carry the farmer 15 ft
        let moved = motion.tick(5.0, &graph);
        assert!(moved <= 10.0 + 1e-5);
        assert_eq!(motion.position(), Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((normalize_angle(PI) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_empty_graph_stays_idle() {
        let graph = PathGraph::default();
        let mut motion = controller(vec![0, 1, 2]);
        motion.place(&graph);
        for _ in 0..10 {
            assert_eq!(motion.tick(0.1, &graph), 0.0);
        }
        assert_eq!(motion.state(), MotionState::Idle);
        assert!(motion.route().is_empty());
    }

    #[test]
    fn test_first_tick_picks_goal_without_moving() {
        let graph = straight_graph();
        let start = graph.node_near(Vec3::ZERO, 0.01).unwrap();
        let end = graph.node_near(Vec3::new(20.0, 0.0, 0.0), 0.01).unwrap();
        // place on start, then the first pick equals start and is retried
        let mut motion = controller(vec![start, start, end]);
        motion.place(&graph);
        assert_eq!(motion.current_node(), Some(start));

        let moved = motion.tick(0.5, &graph);
        assert_eq!(moved, 0.0);
        assert_eq!(motion.state(), MotionState::Traveling);
        assert_eq!(motion.route().len(), graph.node_count());
        assert_eq!(motion.position(), Vec3::ZERO);
    }

    #[test]
    fn test_walks_route_to_goal() {
        let graph = straight_graph();
        let start = graph.node_near(Vec3::ZERO, 0.01).unwrap();
        let end = graph.node_near(Vec3::new(20.0, 0.0, 0.0), 0.01).unwrap();
        let mut motion = controller(vec![start, end, start]);
        motion.place(&graph);

        let mut reached = false;
        for _ in 0..400 {
            motion.tick(0.1, &graph);
            if motion.current_node() == Some(end) {
                reached = true;
                break;
            }
        }
        assert!(reached, "farmer never reached the far end");
        // Heading settles toward +X (atan2(1, 0) = PI / 2)
        assert!((motion.heading() - PI / 2.0).abs() < 0.05);
    }

    #[test]
    fn test_step_size_bounded_by_speed() {
        let graph = straight_graph();
        let start = graph.node_near(Vec3::ZERO, 0.01).unwrap();
        let end = graph.node_near(Vec3::new(20.0, 0.0, 0.0), 0.01).unwrap();
        let mut motion = controller(vec![start, end]);
        motion.place(&graph);
        for _ in 0..50 {
            let moved = motion.tick(0.25, &graph);
            assert!(moved <= 3.0 * 0.25 + 1e-5);
        }
    }

    #[test]
    fn test_single_node_graph_gives_up_after_attempts() {
        let mut graph = PathGraph::new(0.1);
        graph.add_node(Vec3::ZERO);
        let mut motion = controller(vec![0]);
        motion.place(&graph);
        motion.tick(0.1, &graph);
        assert_eq!(motion.state(), MotionState::Idle);
    }

    #[test]
    fn test_unreachable_goal_retries() {
        let mut graph = PathGraph::new(0.1);
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::X);
        let c = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        graph.connect(a, b);
        // a, then c (unreachable), then b (reachable)
        let mut motion = controller(vec![a, c, b]);
        motion.place(&graph);
        motion.tick(0.1, &graph);
        assert_eq!(motion.state(), MotionState::Idle);
        motion.tick(0.1, &graph);
        assert_eq!(motion.state(), MotionState::Traveling);
    }

    #[test]
    fn test_heading_blends_not_snaps() {
        let graph = straight_graph();
        let start = graph.node_near(Vec3::ZERO, 0.01).unwrap();
        let end = graph.node_near(Vec3::new(20.0, 0.0, 0.0), 0.01).unwrap();
        let mut motion = controller(vec![start, end]);
        motion.place(&graph);
        motion.tick(0.1, &graph); // pick goal
        motion.tick(0.1, &graph); // arrive at first waypoint (start)
        motion.tick(0.1, &graph); // first real step
        let expected = (PI / 2.0) * 0.15;
        assert!((motion.heading() - expected).abs() < 1e-4);
    }
}
