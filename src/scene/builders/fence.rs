//! Perimeter fence: posts, top and bottom rails, wire mesh panels and gates.

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::garden::{Fence, FenceSide, GardenDescription, Gate};
use crate::geometry::{primitives, Mesh};
use crate::scene::config::StructureConfig;
use crate::scene::materials::{FENCE_WOOD, WIRE};
use crate::scene::node::Material;

use super::Part;

/// Square post cross-section (feet).
pub const POST_SIZE: f32 = 0.33;
/// Rail cross-section (feet).
const RAIL_SIZE: f32 = 0.15;
/// Gate frame tube radius (feet).
const GATE_TUBE: f32 = 0.06;
/// Wire panel transparency.
const WIRE_OPACITY: f32 = 0.45;

/// One straight side of the fence in world space (y = 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FenceRun {
    pub side: FenceSide,
    pub start: Vec2,
    pub end: Vec2,
}

impl FenceRun {
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    /// World position (x, z) at distance `d` from the start.
    pub fn point_at(&self, d: f32) -> Vec2 {
        let len = self.length();
        if len <= 0.0 {
            return self.start;
        }
        self.start + (self.end - self.start) * (d / len)
    }
}

/// The four sides of a `width` x `length` garden centred on the origin.
///
/// North runs along +X at z = -length/2, south at z = +length/2; west runs
/// along +Z at x = -width/2, east at x = +width/2.
pub fn fence_runs(width: f32, length: f32) -> [FenceRun; 4] {
    let hw = width * 0.5;
    let hl = length * 0.5;
    [
        FenceRun { side: FenceSide::North, start: Vec2::new(-hw, -hl), end: Vec2::new(hw, -hl) },
        FenceRun { side: FenceSide::South, start: Vec2::new(-hw, hl), end: Vec2::new(hw, hl) },
        FenceRun { side: FenceSide::West, start: Vec2::new(-hw, -hl), end: Vec2::new(-hw, hl) },
        FenceRun { side: FenceSide::East, start: Vec2::new(hw, -hl), end: Vec2::new(hw, hl) },
    ]
}

/// Gate openings on a side as `(start, end)` distances, clamped and sorted.
pub fn gate_openings(run_length: f32, side: FenceSide, gates: &[Gate]) -> Vec<(f32, f32)> {
    let mut openings: Vec<(f32, f32)> = gates
        .iter()
        .filter(|g| g.side == side && g.width > 0.0)
        .map(|g| {
            let a = (g.offset - g.width * 0.5).clamp(0.0, run_length);
            let b = (g.offset + g.width * 0.5).clamp(0.0, run_length);
            (a, b)
        })
        .filter(|(a, b)| b - a > 1e-3)
        .collect();
    openings.sort_by(|a, b| a.0.total_cmp(&b.0));
    openings
}

/// Fenced stretches of a side once the gate openings are cut out.
pub fn solid_runs(run_length: f32, openings: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut runs = Vec::new();
    let mut cursor = 0.0;
    for &(a, b) in openings {
        if a > cursor + 1e-3 {
            runs.push((cursor, a));
        }
        cursor = f32::max(cursor, b);
    }
    if run_length > cursor + 1e-3 {
        runs.push((cursor, run_length));
    }
    runs
}

/// Post distances along one solid stretch: both ends plus evenly spaced
/// intermediates no further apart than `spacing`.
pub fn post_positions(start: f32, end: f32, spacing: f32) -> Vec<f32> {
    let length = end - start;
    if length <= 0.0 {
        return Vec::new();
    }
    let spans = (length / spacing.max(0.1)).ceil().max(1.0) as u32;
    (0..=spans)
        .map(|i| start + length * i as f32 / spans as f32)
        .collect()
}

/// Fence parts in world space.
pub fn build_fence(garden: &GardenDescription, fence: &Fence, structures: &StructureConfig) -> Vec<Part> {
    let mut posts = Mesh::new();
    let mut rails = Mesh::new();
    let mut wire = Mesh::new();
    let mut gates = Mesh::new();
    let mut post_points: Vec<Vec2> = Vec::new();
    let height = fence.height.max(0.5);

    for run in fence_runs(garden.width, garden.length) {
        let openings = gate_openings(run.length(), run.side, &fence.gates);
        for (a, b) in solid_runs(run.length(), &openings) {
            for d in post_positions(a, b, structures.fence_post_spacing) {
                let p = run.point_at(d);
                // Corners are shared by two sides
                if post_points.iter().any(|q| q.distance(p) < 1e-3) {
                    continue;
                }
                post_points.push(p);
                posts.append(
                    &primitives::cuboid(Vec3::new(POST_SIZE, height, POST_SIZE))
                        .translated(Vec3::new(p.x, height * 0.5, p.y)),
                );
            }

            let from = run.point_at(a);
            let to = run.point_at(b);
            for y in [RAIL_SIZE, height - RAIL_SIZE * 0.5] {
                rails.append(&rail(from, to, y));
            }
            wire.append(&wire_panel(from, to, RAIL_SIZE * 1.5, height - RAIL_SIZE));
        }

        for &(a, b) in &openings {
            gates.append(&gate_frame(run.point_at(a), run.point_at(b), height));
        }
    }

    log::debug!("Fence: {} posts, {} gates", post_points.len(), fence.gates.len());

    let wood = Material::flat(FENCE_WOOD).with_roughness(0.9, 0.0);
    let parts = vec![
        Part::new("posts", posts, wood.clone()),
        Part::new("rails", rails, wood),
        Part::new("wire", wire, Material::flat(WIRE).with_roughness(0.4, 0.7).with_opacity(WIRE_OPACITY)),
        Part::new("gates", gates, Material::flat(WIRE).with_roughness(0.4, 0.7)),
    ];
    parts.into_iter().filter(|p| !p.mesh.is_empty()).collect()
}

/// Yaw that turns local +X onto the ground direction `dir`.
fn yaw_along(dir: Vec2) -> f32 {
    (-dir.y).atan2(dir.x)
}

fn rail(from: Vec2, to: Vec2, y: f32) -> Mesh {
    let dir = to - from;
    let mid = (from + to) * 0.5;
    primitives::cuboid(Vec3::new(dir.length(), RAIL_SIZE, RAIL_SIZE)).transformed(Mat4::from_rotation_translation(
        Quat::from_rotation_y(yaw_along(dir)),
        Vec3::new(mid.x, y, mid.y),
    ))
}

/// Vertical double-sided quad between two ground points.
fn wire_panel(from: Vec2, to: Vec2, bottom: f32, top: f32) -> Mesh {
    let mut mesh = Mesh::new();
    let dir = to - from;
    let normal = Vec3::new(-dir.y, 0.0, dir.x).normalize_or(Vec3::Z);
    let u = dir.length() / 0.5;
    let v = (top - bottom) / 0.5;
    let a = mesh.push_vertex(Vec3::new(from.x, bottom, from.y), normal, Vec2::new(0.0, 0.0));
    let b = mesh.push_vertex(Vec3::new(to.x, bottom, to.y), normal, Vec2::new(u, 0.0));
    let c = mesh.push_vertex(Vec3::new(to.x, top, to.y), normal, Vec2::new(u, v));
    let d = mesh.push_vertex(Vec3::new(from.x, top, from.y), normal, Vec2::new(0.0, v));
    mesh.push_quad(a, b, c, d);
    mesh
}

/// Rectangular tube frame with a diagonal brace filling a gate opening.
/// The posts either side come from the neighbouring solid runs.
fn gate_frame(from: Vec2, to: Vec2, height: f32) -> Mesh {
    let inset = (to - from).normalize_or_zero() * (POST_SIZE * 0.5 + GATE_TUBE);
    let a = from + inset;
    let b = to - inset;
    let bottom = 0.25;
    let top = height - 0.1;
    let corners = [
        Vec3::new(a.x, bottom, a.y),
        Vec3::new(b.x, bottom, b.y),
        Vec3::new(b.x, top, b.y),
        Vec3::new(a.x, top, a.y),
        Vec3::new(a.x, bottom, a.y),
        Vec3::new(b.x, top, b.y),
    ];
    primitives::tube(&corners, GATE_TUBE, 6)
}
