//! Sagging cables and the tented bird-netting surface.
//!
//! A single cable between two anchors follows a parabola:
//! `y(t) = lerp(y0, y1, t) - sag_amount * span * 4t(1 - t)`.
//! The netting surface is tented from a high ridge (the support posts) down
//! to the eave (fence-top height) at the perimeter, and additionally droops
//! between the supporting cables.

use glam::{Vec2, Vec3};

use super::mesh::Mesh;
use super::primitives;

/// Downward sag at parameter `t` along a cable of horizontal length `span`.
///
/// Zero at both anchors, maximal (`sag_amount * span`) at the midpoint.
pub fn cable_sag(t: f32, sag_amount: f32, span: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    sag_amount * span * 4.0 * t * (1.0 - t)
}

/// Height of a cable at `t` between anchors at heights `y0` and `y1`.
pub fn cable_height(y0: f32, y1: f32, t: f32, sag_amount: f32, span: f32) -> f32 {
    y0 + (y1 - y0) * t - cable_sag(t, sag_amount, span)
}

/// Sample a sagging cable between two anchors into `segments + 1` points.
pub fn cable_points(a: Vec3, b: Vec3, sag_amount: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(1);
    let span = Vec2::new(b.x - a.x, b.z - a.z).length();
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let mut p = a.lerp(b, t);
            p.y = cable_height(a.y, b.y, t, sag_amount, span);
            p
        })
        .collect()
}

/// Horizontal segment on the ground plane (x, z).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl GroundSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Shortest distance from `p` to this segment.
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let d = self.end - self.start;
        let len_sq = d.length_squared();
        if len_sq < 1e-12 {
            return (p - self.start).length();
        }
        let t = ((p - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        (p - (self.start + d * t)).length()
    }
}

/// Tented netting over a rectangular footprint centred on the origin.
#[derive(Clone, Debug)]
pub struct NettingSurface {
    /// Half extents of the footprint (x, z).
    pub half_extent: Vec2,
    /// High line of the tent, usually through the support posts.
    pub ridge: GroundSegment,
    /// Height at the ridge.
    pub ridge_height: f32,
    /// Height at the perimeter (fence top).
    pub eave_height: f32,
    /// Cables holding the net up; the net droops between them.
    pub cables: Vec<GroundSegment>,
    /// Depth of the droop halfway between cables.
    pub sag_depth: f32,
    /// Distance from a cable at which the droop is deepest.
    pub sag_half_span: f32,
}

/// Distance over which droop fades out toward the perimeter.
const EDGE_FADE: f32 = 1.0;

impl NettingSurface {
    /// Distance from `p` to the nearest perimeter edge (0 outside).
    fn edge_distance(&self, p: Vec2) -> f32 {
        let dx = self.half_extent.x - p.x.abs();
        let dz = self.half_extent.y - p.y.abs();
        dx.min(dz).max(0.0)
    }

    /// Surface height at ground position `(x, z)`.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        let p = Vec2::new(x, z);
        let to_ridge = self.ridge.distance_to(p);
        let to_edge = self.edge_distance(p);

        let total = to_ridge + to_edge;
        let frac = if total < 1e-6 { 0.0 } else { to_ridge / total };
        let tent = self.ridge_height + (self.eave_height - self.ridge_height) * frac;

        tent - self.droop_at(p, to_edge)
    }

    fn droop_at(&self, p: Vec2, to_edge: f32) -> f32 {
        if self.sag_depth <= 0.0 || self.sag_half_span <= 0.0 {
            return 0.0;
        }
        let Some(to_cable) = self
            .cables
            .iter()
            .map(|c| c.distance_to(p))
            .min_by(|a, b| a.total_cmp(b))
        else {
            return 0.0;
        };
        // Parabola that is 0 on the cable and peaks at sag_half_span away
        let s = (to_cable / self.sag_half_span).min(1.0);
        let droop = self.sag_depth * s * (2.0 - s);
        droop * (to_edge / EDGE_FADE).min(1.0)
    }

    /// Tessellate the surface into a grid mesh.
    pub fn build_mesh(&self, segments_x: u32, segments_z: u32) -> Mesh {
        let mut mesh = primitives::grid(
            self.half_extent.x * 2.0,
            self.half_extent.y * 2.0,
            segments_x,
            segments_z,
        );
        for p in &mut mesh.positions {
            p.y = self.height_at(p.x, p.z);
        }
        mesh.compute_normals();
        mesh
    }
}
