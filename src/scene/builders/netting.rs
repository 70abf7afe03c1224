//! Bird netting tented over the garden on support posts.

use glam::{Vec2, Vec3};

use crate::garden::{BirdNetting, GardenDescription};
use crate::geometry::{cable_points, primitives, GroundSegment, Mesh, NettingSurface};
use crate::scene::config::StructureConfig;
use crate::scene::materials::{NETTING, WIRE};
use crate::scene::node::Material;

use super::Part;

/// Net surface transparency.
pub const NETTING_OPACITY: f32 = 0.35;
/// Support post radius (feet).
const POST_RADIUS: f32 = 0.12;
/// Cable radius (feet).
const CABLE_RADIUS: f32 = 0.025;
/// Distance either side of a cable at which the net droops deepest (feet).
const SAG_HALF_SPAN: f32 = 3.0;
/// Ridge end inset from the short sides when no posts are given.
const RIDGE_INSET: f32 = 0.2;
/// Eave height relative to the ridge when there is no fence.
const EAVE_RATIO: f32 = 0.75;
/// Upper bound on surface grid cells per axis.
const MAX_CELLS: u32 = 200;

/// Ridge of the tent in world (x, z).
///
/// Runs through the two posts furthest apart; with fewer than two posts it
/// runs along the garden's long axis, inset from the ends.
pub fn ridge_line(half_extent: Vec2, posts: &[Vec2]) -> GroundSegment {
    let mut best: Option<(f32, Vec2, Vec2)> = None;
    for (i, a) in posts.iter().enumerate() {
        for b in &posts[i + 1..] {
            let d = a.distance_squared(*b);
            if best.is_none_or(|(bd, _, _)| d > bd) {
                best = Some((d, *a, *b));
            }
        }
    }
    if let Some((d, a, b)) = best {
        if d > 1e-6 {
            return GroundSegment::new(a, b);
        }
    }

    let centre = posts.first().copied().unwrap_or(Vec2::ZERO);
    if half_extent.x >= half_extent.y {
        let reach = half_extent.x * (1.0 - 2.0 * RIDGE_INSET);
        GroundSegment::new(Vec2::new(-reach, centre.y), Vec2::new(reach, centre.y))
    } else {
        let reach = half_extent.y * (1.0 - 2.0 * RIDGE_INSET);
        GroundSegment::new(Vec2::new(centre.x, -reach), Vec2::new(centre.x, reach))
    }
}

/// Closest perimeter point to `p`.
fn nearest_edge_point(half_extent: Vec2, p: Vec2) -> Vec2 {
    let dx = half_extent.x - p.x.abs();
    let dz = half_extent.y - p.y.abs();
    if dx <= dz {
        Vec2::new(half_extent.x.copysign(p.x), p.y)
    } else {
        Vec2::new(p.x, half_extent.y.copysign(p.y))
    }
}

/// Cables as ground segments: post-to-post along the ridge, then from each
/// post out to the nearest point on the perimeter.
pub fn cable_layout(half_extent: Vec2, ridge: &GroundSegment, posts: &[Vec2]) -> Vec<GroundSegment> {
    let mut cables = vec![*ridge];
    let anchors: Vec<Vec2> = if posts.is_empty() {
        vec![ridge.start, ridge.end]
    } else {
        posts.to_vec()
    };
    for pair in anchors.windows(2) {
        let segment = GroundSegment::new(pair[0], pair[1]);
        if segment != *ridge && pair[0].distance(pair[1]) > 1e-3 {
            cables.push(segment);
        }
    }
    for &p in &anchors {
        let edge = nearest_edge_point(half_extent, p);
        if edge.distance(p) > 1e-3 {
            cables.push(GroundSegment::new(p, edge));
        }
    }
    cables
}

/// Netting surface, posts and cables in world space.
pub fn build_netting(
    garden: &GardenDescription,
    netting: &BirdNetting,
    structures: &StructureConfig,
) -> Vec<Part> {
    let half_extent = Vec2::new(garden.width * 0.5, garden.length * 0.5);
    let posts: Vec<Vec2> = netting
        .support_posts
        .iter()
        .map(|p| {
            let w = garden.to_world(p.x, p.z);
            Vec2::new(w.x, w.z)
        })
        .collect();

    let ridge = ridge_line(half_extent, &posts);
    let ridge_height = netting.height.max(0.5);
    let eave_height = garden
        .fence
        .as_ref()
        .map_or(ridge_height * EAVE_RATIO, |f| f.height.min(ridge_height));
    let cables = cable_layout(half_extent, &ridge, &posts);

    let surface = NettingSurface {
        half_extent,
        ridge,
        ridge_height,
        eave_height,
        cables: cables.clone(),
        sag_depth: netting.sag.max(0.0) * SAG_HALF_SPAN * 2.0,
        sag_half_span: SAG_HALF_SPAN,
    };
    let density = structures.netting_cells_per_foot;
    let cells_x = ((garden.width * density).ceil() as u32).clamp(2, MAX_CELLS);
    let cells_z = ((garden.length * density).ceil() as u32).clamp(2, MAX_CELLS);
    let net = surface.build_mesh(cells_x, cells_z);

    let post_feet: Vec<Vec2> = if posts.is_empty() {
        vec![ridge.start, ridge.end]
    } else {
        posts.clone()
    };
    let mut post_mesh = Mesh::new();
    for p in &post_feet {
        let height = surface.height_at(p.x, p.y);
        post_mesh.append(&primitives::cylinder(POST_RADIUS, POST_RADIUS, height, 8).translated(Vec3::new(p.x, 0.0, p.y)));
    }

    let mut cable_mesh = Mesh::new();
    for cable in &cables {
        let a = Vec3::new(cable.start.x, surface.height_at(cable.start.x, cable.start.y), cable.start.y);
        let b = Vec3::new(cable.end.x, surface.height_at(cable.end.x, cable.end.y), cable.end.y);
        let points = cable_points(a, b, netting.sag, structures.cable_segments);
        cable_mesh.append(&primitives::tube(&points, CABLE_RADIUS, 5));
    }

    log::debug!(
        "Netting: {} posts, {} cables, ridge {:.1} ft, eave {:.1} ft",
        post_feet.len(),
        cables.len(),
        ridge_height,
        eave_height
    );

    let parts = vec![
        Part::new("net", net, Material::flat(NETTING).with_roughness(0.9, 0.0).with_opacity(NETTING_OPACITY)),
        Part::new("posts", post_mesh, Material::flat(WIRE).with_roughness(0.5, 0.6)),
        Part::new("cables", cable_mesh, Material::flat(WIRE).with_roughness(0.4, 0.8)),
    ];
    parts.into_iter().filter(|p| !p.mesh.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::{Fence, LayoutPoint};

    fn netting(posts: Vec<LayoutPoint>) -> BirdNetting {
        BirdNetting {
            enabled: true,
            height: 8.0,
            support_posts: posts,
            sag: 0.04,
        }
    }

    #[test]
    fn test_ridge_through_farthest_posts() {
        let posts = [Vec2::new(-5.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(6.0, 0.0)];
        let ridge = ridge_line(Vec2::new(10.0, 5.0), &posts);
        assert_eq!(ridge.start, Vec2::new(-5.0, 0.0));
        assert_eq!(ridge.end, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_default_ridge_follows_long_axis() {
        let ridge = ridge_line(Vec2::new(5.0, 10.0), &[]);
        assert_eq!(ridge.start.x, 0.0);
        assert!((ridge.end.y - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_cables_reach_perimeter() {
        let half = Vec2::new(10.0, 5.0);
        let posts = [Vec2::new(-4.0, 0.0), Vec2::new(4.0, 0.0)];
        let ridge = ridge_line(half, &posts);
        let cables = cable_layout(half, &ridge, &posts);
        // Ridge plus one perimeter cable per post
        assert_eq!(cables.len(), 3);
        for c in &cables[1..] {
            assert_eq!(c.end.y.abs(), 5.0);
        }
    }

    #[test]
    fn test_tent_from_ridge_to_fence_top() {
        let mut garden = GardenDescription::new(20.0, 10.0);
        garden.fence = Some(Fence { height: 4.0, gates: vec![] });
        let posts = vec![LayoutPoint { x: 4.0, z: 5.0 }, LayoutPoint { x: 16.0, z: 5.0 }];
        let parts = build_netting(&garden, &netting(posts), &StructureConfig::default());
        let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["net", "posts", "cables"]);

        let net = &parts[0];
        assert!(net.material.opacity < 1.0);
        let bounds = net.mesh.bounds().unwrap();
        assert!(bounds.max.y <= 8.0 + 1e-4);
        assert!(bounds.min.y >= 4.0 - 0.5);
        // Perimeter vertices sit at the eave
        for p in &net.mesh.positions {
            if (p.x.abs() - 10.0).abs() < 1e-4 {
                assert!((p.y - 4.0).abs() < 1e-3, "eave vertex at {p:?}");
            }
        }
    }

    #[test]
    fn test_eave_without_fence() {
        let garden = GardenDescription::new(12.0, 12.0);
        let parts = build_netting(&garden, &netting(vec![]), &StructureConfig::default());
        let bounds = parts[0].mesh.bounds().unwrap();
        assert!(bounds.min.y >= 6.0 - 0.5);
        assert!(parts[1].mesh.triangle_count() > 0);
    }
}
