//! Path ribbons laid over the ground.

use glam::Vec3;

use crate::garden::{GardenDescription, GardenPath};
use crate::geometry::primitives;
use crate::scene::config::SceneConfig;
use crate::scene::materials::{path_surface, textured_or_flat};
use crate::terrain::{ground_height, noise2d};

use super::Part;

/// Maximum distance between ribbon cross-sections (feet).
const STEP: f32 = 1.0;
/// Noise frequency of the path surface (cycles per foot).
const ROUGHNESS_SCALE: f32 = 1.7;

/// Insert points so no two consecutive points are more than `step` apart.
pub fn densify(points: &[Vec3], step: f32) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let n = ((a.distance(b) / step.max(0.01)).ceil() as u32).max(1);
        out.extend((0..n).map(|i| a.lerp(b, i as f32 / n as f32)));
    }
    if let Some(last) = points.last() {
        out.push(*last);
    }
    out
}

/// Ribbon for one path, draped over the ground. `None` for degenerate paths.
pub fn build_path(path: &GardenPath, garden: &GardenDescription, config: &SceneConfig) -> Option<Part> {
    let ground = &config.ground;
    let polyline: Vec<Vec3> = path
        .points
        .iter()
        .map(|p| garden.to_world(p.x, p.z) + Vec3::Y * p.y)
        .collect();
    if polyline.len() < 2 || path.width <= 0.0 {
        log::warn!("Path '{}' has fewer than two points or no width, skipping", path.id);
        return None;
    }

    let draped: Vec<Vec3> = densify(&polyline, STEP)
        .into_iter()
        .map(|p| Vec3::new(p.x, p.y + ground_height(p.x, p.z, &ground.ground) + ground.path_lift, p.z))
        .collect();

    let mut mesh = primitives::ribbon(&draped, path.width);
    if mesh.is_empty() {
        log::warn!("Path '{}' collapses to a point, skipping", path.id);
        return None;
    }
    for p in &mut mesh.positions {
        p.y += noise2d(p.x * ROUGHNESS_SCALE, p.z * ROUGHNESS_SCALE) * ground.path_roughness;
    }
    mesh.compute_normals();

    let (color, texture) = path_surface(path.material);
    let material = textured_or_flat(config, texture, color);
    Some(Part::new(format!("path:{}", path.id), mesh, material))
}
