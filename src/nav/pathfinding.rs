//! A* search over the path graph.
//!
//! Open set is a `BinaryHeap` turned into a min-heap by reversing `Ord`.
//! Scores and back-links live in `Vec`s indexed by node id, so the search is
//! deterministic for a given graph. Edge cost and heuristic are both
//! straight-line distance, which keeps the heuristic admissible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::graph::PathGraph;

/// Frontier entry ordered by lowest f-score, then lowest node id.
struct OpenEntry {
    node: usize,
    f_score: f32,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score.total_cmp(&other.f_score) == Ordering::Equal && self.node == other.node
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: smallest f-score is "greatest"
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Shortest route from `start` to `goal` as a list of node ids (inclusive).
///
/// Returns an empty list when either id is out of range or the goal is
/// unreachable, and `[start]` when `start == goal`.
pub fn find_path(graph: &PathGraph, start: usize, goal: usize) -> Vec<usize> {
    let n = graph.node_count();
    if start >= n || goal >= n {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let Some(goal_pos) = graph.position(goal) else {
        return Vec::new();
    };
    let heuristic = |id: usize| {
        graph
            .position(id)
            .map_or(f32::INFINITY, |p| p.distance(goal_pos))
    };

    let mut g_score = vec![f32::INFINITY; n];
    let mut came_from: Vec<Option<usize>> = vec![None; n];
    let mut closed = vec![false; n];

    g_score[start] = 0.0;
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        node: start,
        f_score: heuristic(start),
    });

    while let Some(OpenEntry { node: current, .. }) = open.pop() {
        if current == goal {
            return reconstruct(&came_from, goal);
        }
        if closed[current] {
            continue;
        }
        closed[current] = true;

        let Some(current_pos) = graph.position(current) else {
            continue;
        };
        let current_g = g_score[current];

        for neighbor in graph.neighbors(current) {
            if closed[neighbor] {
                continue;
            }
            let Some(neighbor_pos) = graph.position(neighbor) else {
                continue;
            };
            let tentative = current_g + current_pos.distance(neighbor_pos);
            if tentative < g_score[neighbor] {
                g_score[neighbor] = tentative;
                came_from[neighbor] = Some(current);
                open.push(OpenEntry {
                    node: neighbor,
                    f_score: tentative + heuristic(neighbor),
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct(came_from: &[Option<usize>], goal: usize) -> Vec<usize> {
    let mut route = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current] {
        route.push(prev);
        current = prev;
    }
    route.reverse();
    route
}

/// Summed edge length of a route. Unknown ids contribute nothing.
pub fn route_length(graph: &PathGraph, route: &[usize]) -> f32 {
    route
        .windows(2)
        .filter_map(|pair| Some(graph.position(pair[0])?.distance(graph.position(pair[1])?)))
        .sum()
}
