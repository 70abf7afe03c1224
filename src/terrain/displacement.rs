//! Height fields for the garden ground and raised-bed soil.

use serde::{Deserialize, Serialize};

use crate::geometry::Mesh;

use super::noise::noise2d;

/// Undulation of the open ground.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundParams {
    /// Noise frequency in cycles per foot.
    pub noise_scale: f32,
    /// Peak height offset in feet.
    pub noise_strength: f32,
    /// Height of the flat ground before displacement.
    pub base_height: f32,
}

impl Default for GroundParams {
    fn default() -> Self {
        Self {
            noise_scale: 0.08,
            noise_strength: 0.15,
            base_height: 0.0,
        }
    }
}

/// Ground height at world `(x, z)`.
pub fn ground_height(x: f32, z: f32, params: &GroundParams) -> f32 {
    params.base_height + noise2d(x * params.noise_scale, z * params.noise_scale) * params.noise_strength
}

/// Soil surface inside a raised bed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilParams {
    /// Soil height at the frame walls.
    pub base_height: f32,
    /// Extra height of the mound at the bed centre.
    pub bulge: f32,
    /// Noise frequency in cycles per foot.
    pub noise_scale: f32,
    /// Peak noise offset in feet.
    pub noise_strength: f32,
}

impl Default for SoilParams {
    fn default() -> Self {
        Self {
            base_height: 0.0,
            bulge: 0.15,
            noise_scale: 0.9,
            noise_strength: 0.04,
        }
    }
}

/// Soil height at bed-local `(local_x, local_z)` for a `width` x `length` bed.
///
/// `origin` is the bed's world position in (x, z); noise is sampled in world
/// space so every bed looks different but always the same. Points on or
/// outside the bed edge return exactly `base_height`, so the mound meets the
/// frame walls without a gap.
pub fn soil_height(
    local_x: f32,
    local_z: f32,
    width: f32,
    length: f32,
    origin: (f32, f32),
    params: &SoilParams,
) -> f32 {
    if width <= 0.0 || length <= 0.0 {
        return params.base_height;
    }
    let nx = local_x / (width * 0.5);
    let nz = local_z / (length * 0.5);
    const EDGE: f32 = 1.0 - 1e-4;
    if nx.abs() >= EDGE || nz.abs() >= EDGE {
        return params.base_height;
    }

    // Quadratic falloff: 1 at the centre, 0 along every edge
    let falloff = (1.0 - nx * nx) * (1.0 - nz * nz);
    let wx = origin.0 + local_x;
    let wz = origin.1 + local_z;
    let noise = noise2d(wx * params.noise_scale, wz * params.noise_scale) * params.noise_strength;

    params.base_height + (params.bulge + noise) * falloff
}

/// Height offsets for every vertex of a `segments_x` x `segments_z` soil grid,
/// in the same row-major order as [`crate::geometry::primitives::grid`].
pub fn soil_displacement_field(
    width: f32,
    length: f32,
    segments_x: u32,
    segments_z: u32,
    origin: (f32, f32),
    params: &SoilParams,
) -> Vec<f32> {
    let sx = segments_x.max(1);
    let sz = segments_z.max(1);
    let mut field = Vec::with_capacity(((sx + 1) * (sz + 1)) as usize);
    for j in 0..=sz {
        let z = (j as f32 / sz as f32 - 0.5) * length;
        for i in 0..=sx {
            let x = (i as f32 / sx as f32 - 0.5) * width;
            field.push(soil_height(x, z, width, length, origin, params));
        }
    }
    field
}

/// Set every vertex height of `mesh` from `height(x, z)` and refresh normals.
pub fn displace_grid(mesh: &mut Mesh, height: impl Fn(f32, f32) -> f32) {
    for p in &mut mesh.positions {
        p.y = height(p.x, p.z);
    }
    mesh.compute_normals();
}
