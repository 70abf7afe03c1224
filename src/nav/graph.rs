//! Path graph: nodes sampled along garden paths, connected along segments.
//!
//! Nodes are merged by rounded position across the whole graph, so two
//! segments passing through the same point share one node. Crossings between
//! segments of *different* paths get an explicit node so the character can
//! turn there. All edges are undirected and stored on both endpoints.

use std::collections::{BTreeSet, HashMap};

use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::math::segment_intersection;

use super::config::NavConfig;

/// Rounded position used to merge nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey(pub i32, pub i32, pub i32);

impl PositionKey {
    /// Round `position` onto a grid of `resolution` feet.
    pub fn new(position: Vec3, resolution: f32) -> Self {
        let inv = 1.0 / resolution.max(1e-6);
        Self(
            (position.x * inv).round() as i32,
            (position.y * inv).round() as i32,
            (position.z * inv).round() as i32,
        )
    }
}

/// A point on the walkable network.
#[derive(Clone, Debug, PartialEq)]
pub struct PathNode {
    pub id: usize,
    pub position: Vec3,
    /// Adjacent node ids. Ordered for deterministic iteration.
    pub neighbors: BTreeSet<usize>,
}

/// Undirected graph over the garden's paths.
#[derive(Clone, Debug, Default)]
pub struct PathGraph {
    nodes: Vec<PathNode>,
    index: HashMap<PositionKey, usize>,
    resolution: f32,
}

/// One straight piece of a path polyline.
#[derive(Clone, Copy, Debug)]
struct Segment {
    path: usize,
    start: Vec3,
    end: Vec3,
}

impl Segment {
    fn xz(&self) -> (Vec2, Vec2) {
        (self.start.xz(), self.end.xz())
    }

    fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// Parametric sample on a segment; crossings carry their exact position.
#[derive(Clone, Copy, Debug)]
struct Sample {
    t: f32,
    exact: Option<Vec3>,
}

impl PathGraph {
    /// Create an empty graph merging nodes on a `resolution`-foot grid.
    pub fn new(resolution: f32) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            resolution,
        }
    }

    /// Build the graph from path polylines (world space, feet).
    ///
    /// Polylines with fewer than two points and zero-length segments are
    /// skipped. No paths yields an empty graph.
    pub fn build(paths: &[Vec<Vec3>], config: &NavConfig) -> Self {
        let mut graph = Self::new(config.position_resolution);

        let mut segments = Vec::new();
        for (path_index, points) in paths.iter().enumerate() {
            if points.len() < 2 {
                log::warn!(
                    "Skipping path {} with {} point(s); at least 2 are needed",
                    path_index,
                    points.len()
                );
                continue;
            }
            for pair in points.windows(2) {
                let segment = Segment { path: path_index, start: pair[0], end: pair[1] };
                if segment.length() < config.min_segment_length {
                    log::debug!("Skipping zero-length segment on path {}", path_index);
                    continue;
                }
                segments.push(segment);
            }
        }

        let crossings = find_crossings(&segments);

        for segment in &segments {
            let samples = segment_samples(segment, &crossings, config);
            let mut previous = None;
            for sample in samples {
                let position = sample
                    .exact
                    .unwrap_or_else(|| segment.start.lerp(segment.end, sample.t));
                let id = graph.add_node(position);
                if let Some(prev) = previous {
                    graph.connect(prev, id);
                }
                previous = Some(id);
            }
        }

        log::debug!(
            "Path graph: {} nodes, {} edges from {} paths ({} segments, {} crossings)",
            graph.node_count(),
            graph.edge_count(),
            paths.len(),
            segments.len(),
            crossings.len()
        );
        graph
    }

    /// Register a node at `position`, reusing an existing node with the same
    /// rounded position. Returns the node id.
    pub fn add_node(&mut self, position: Vec3) -> usize {
        let key = PositionKey::new(position, self.resolution);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(PathNode {
            id,
            position,
            neighbors: BTreeSet::new(),
        });
        self.index.insert(key, id);
        id
    }

    /// Connect two nodes in both directions. Self-loops and unknown ids are ignored.
    pub fn connect(&mut self, a: usize, b: usize) {
        if a == b || a >= self.nodes.len() || b >= self.nodes.len() {
            return;
        }
        self.nodes[a].neighbors.insert(b);
        self.nodes[b].neighbors.insert(a);
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.neighbors.len()).sum::<usize>() / 2
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by id.
    pub fn node(&self, id: usize) -> Option<&PathNode> {
        self.nodes.get(id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Position of a node.
    pub fn position(&self, id: usize) -> Option<Vec3> {
        self.nodes.get(id).map(|n| n.position)
    }

    /// Neighbors of a node (empty for unknown ids).
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|n| n.neighbors.iter().copied())
    }

    /// Nearest node to `position`, if any.
    pub fn nearest_node(&self, position: Vec3) -> Option<usize> {
        self.nodes
            .iter()
            .min_by(|a, b| {
                a.position
                    .distance_squared(position)
                    .total_cmp(&b.position.distance_squared(position))
            })
            .map(|n| n.id)
    }

    /// Nearest node within `tolerance` feet (horizontal distance).
    pub fn node_near(&self, position: Vec3, tolerance: f32) -> Option<usize> {
        let id = self.nearest_node(position)?;
        let node_pos = self.nodes[id].position;
        (node_pos.xz().distance(position.xz()) <= tolerance).then_some(id)
    }

    /// Whether every edge is stored on both endpoints.
    pub fn is_reciprocal(&self) -> bool {
        self.nodes.iter().all(|node| {
            node.neighbors.iter().all(|&other| {
                self.nodes
                    .get(other)
                    .is_some_and(|n| n.neighbors.contains(&node.id))
            })
        })
    }
}

/// Crossing points between segments of different paths.
fn find_crossings(segments: &[Segment]) -> Vec<Vec3> {
    let mut crossings = Vec::new();
    for (i, a) in segments.iter().enumerate() {
        for b in &segments[i + 1..] {
            if a.path == b.path {
                continue;
            }
            let (p1, p2) = a.xz();
            let (p3, p4) = b.xz();
            if let Some(hit) = segment_intersection(p1, p2, p3, p4) {
                // Height follows the first segment
                let along = (hit - p1).length() / (p2 - p1).length().max(f32::EPSILON);
                let y = a.start.y + (a.end.y - a.start.y) * along;
                crossings.push(Vec3::new(hit.x, y, hit.y));
            }
        }
    }
    crossings
}

/// Sorted, merged parametric samples for one segment: both endpoints,
/// regular spacing, and any crossings lying on it.
fn segment_samples(segment: &Segment, crossings: &[Vec3], config: &NavConfig) -> Vec<Sample> {
    let length = segment.length();
    let mut samples = vec![
        Sample { t: 0.0, exact: None },
        Sample { t: 1.0, exact: None },
    ];

    if config.node_spacing > 0.0 {
        let count = (length / config.node_spacing).floor() as u32;
        for k in 1..=count {
            let t = k as f32 * config.node_spacing / length;
            if t < 1.0 {
                samples.push(Sample { t, exact: None });
            }
        }
    }

    let (p1, p2) = segment.xz();
    let dir = p2 - p1;
    let len_sq = dir.length_squared();
    let interior = config.merge_epsilon..(1.0 - config.merge_epsilon);
    for crossing in crossings {
        let t = (crossing.xz() - p1).dot(dir) / len_sq;
        if t <= interior.start || t >= interior.end {
            continue;
        }
        // Only crossings that actually lie on this segment
        let on_line = p1 + dir * t;
        if on_line.distance(crossing.xz()) > config.position_resolution {
            continue;
        }
        samples.push(Sample { t, exact: Some(*crossing) });
    }

    samples.sort_by(|a, b| a.t.total_cmp(&b.t));

    let mut merged: Vec<Sample> = Vec::with_capacity(samples.len());
    for sample in samples {
        match merged.last_mut() {
            Some(last) if sample.t - last.t < config.merge_epsilon => {
                // Keep the crossing's exact position over a regular sample,
                // but never move an endpoint
                if last.exact.is_none() && sample.exact.is_some() && last.t > 0.0 {
                    *last = sample;
                }
            }
            _ => merged.push(sample),
        }
    }
    if let Some(last) = merged.last_mut() {
        // The endpoint may have been merged into a sample just below 1.0
        if last.exact.is_none() {
            last.t = 1.0;
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f32, f32)]) -> Vec<Vec3> {
        points.iter().map(|&(x, z)| Vec3::new(x, 0.0, z)).collect()
    }

    fn build(paths: &[Vec<Vec3>]) -> PathGraph {
        PathGraph::build(paths, &NavConfig::default())
    }

    #[test]
    fn test_empty_paths_empty_graph() {
        let graph = build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.nearest_node(Vec3::ZERO).is_none());
    }

    #[test]
    fn test_single_straight_path() {
        let graph = build(&[line(&[(0.0, 0.0), (20.0, 0.0)])]);
        // Two endpoints plus samples at 3, 6, ..., 18
        assert_eq!(graph.node_count(), 8);
        assert_eq!(graph.edge_count(), 7);
        assert!(graph.is_reciprocal());
    }

    #[test]
    fn test_crossing_creates_shared_node() {
        let graph = build(&[
            line(&[(0.0, 0.0), (10.0, 0.0)]),
            line(&[(5.0, -5.0), (5.0, 5.0)]),
        ]);
        let near_center: Vec<_> = graph
            .nodes()
            .iter()
            .filter(|n| n.position.distance(Vec3::new(5.0, 0.0, 0.0)) < 0.2)
            .collect();
        assert_eq!(near_center.len(), 1);
        // Four-way junction
        assert_eq!(near_center[0].neighbors.len(), 4);
        assert!(graph.is_reciprocal());
    }

    #[test]
    fn test_parallel_paths_stay_separate() {
        let graph = build(&[
            line(&[(0.0, 0.0), (10.0, 0.0)]),
            line(&[(0.0, 1.0), (10.0, 1.0)]),
        ]);
        for node in graph.nodes() {
            for &n in &node.neighbors {
                let other = graph.position(n).unwrap();
                assert_eq!(node.position.z, other.z, "edge between parallel paths");
            }
        }
        // 10 ft: endpoints plus 3, 6, 9 on each path
        assert_eq!(graph.node_count(), 10);
    }

    #[test]
    fn test_same_path_self_crossing_ignored() {
        let graph = build(&[line(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])]);
        let near_cross = graph
            .nodes()
            .iter()
            .filter(|n| n.position.distance(Vec3::new(1.0, 0.0, 1.0)) < 0.05)
            .count();
        assert_eq!(near_cross, 0);
    }

    #[test]
    fn test_shared_point_merges_nodes() {
        // Two paths meeting at a shared endpoint join through dedup
        let graph = build(&[
            line(&[(0.0, 0.0), (4.0, 0.0)]),
            line(&[(4.0, 0.0), (4.0, 4.0)]),
        ]);
        let corner = graph.node_near(Vec3::new(4.0, 0.0, 0.0), 0.01).unwrap();
        assert_eq!(graph.node(corner).unwrap().neighbors.len(), 2);
    }

    #[test]
    fn test_degenerate_input_skipped() {
        let graph = build(&[
            line(&[(3.0, 3.0)]),
            line(&[(1.0, 1.0), (1.0, 1.0)]),
            line(&[(0.0, 0.0), (2.0, 0.0)]),
        ]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_reciprocity_on_grid_of_paths() {
        let mut paths = Vec::new();
        for i in 0..4 {
            let c = i as f32 * 5.0;
            paths.push(line(&[(c, -1.0), (c, 16.0)]));
            paths.push(line(&[(-1.0, c), (16.0, c)]));
        }
        paths.push(line(&[(-1.0, -1.0), (16.0, 16.0), (16.0, -1.0)]));
        let graph = build(&paths);
        assert!(graph.is_reciprocal());
        assert!(graph.node_count() > 20);
    }

    #[test]
    fn test_reciprocity_on_random_path_sets() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x6A5D);
        for round in 0..300 {
            let path_count = rng.gen_range(1..=5);
            let paths: Vec<Vec<Vec3>> = (0..path_count)
                .map(|_| {
                    let points = rng.gen_range(2..=6);
                    (0..points)
                        .map(|_| Vec3::new(rng.gen_range(0.0..30.0), 0.0, rng.gen_range(0.0..30.0)))
                        .collect()
                })
                .collect();
            let graph = build(&paths);
            assert!(graph.is_reciprocal(), "round {round}: one-way edge");
            for node in graph.nodes() {
                assert!(!node.neighbors.contains(&node.id), "round {round}: self-loop on {}", node.id);
            }
        }
    }

    #[test]
    fn test_connect_ignores_bad_ids() {
        let mut graph = PathGraph::new(0.1);
        let a = graph.add_node(Vec3::ZERO);
        graph.connect(a, a);
        graph.connect(a, 99);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_node_dedups_by_rounded_position() {
        let mut graph = PathGraph::new(0.1);
        let a = graph.add_node(Vec3::new(1.0, 0.0, 1.0));
        let b = graph.add_node(Vec3::new(1.02, 0.0, 0.98));
        let c = graph.add_node(Vec3::new(1.2, 0.0, 1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_node_near_tolerance() {
        let graph = build(&[line(&[(0.0, 0.0), (20.0, 0.0)])]);
        assert!(graph.node_near(Vec3::new(3.3, 0.0, 0.0), 0.5).is_some());
        assert!(graph.node_near(Vec3::new(4.5, 0.0, 0.0), 0.5).is_none());
    }
}
