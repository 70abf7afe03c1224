//! Deterministic 2D gradient noise.
//!
//! A single Perlin generator built from a fixed seed, i.e. a fixed permutation
//! table. There is no per-call seed or state, so the same garden always gets
//! the same bumps.

use std::sync::LazyLock;

use ::noise::{NoiseFn, Perlin};

/// Seed for the shared permutation table.
const NOISE_SEED: u32 = 0x6A4D_E11E;

static PERLIN: LazyLock<Perlin> = LazyLock::new(|| Perlin::new(NOISE_SEED));

/// Smooth gradient noise in roughly `[-1, 1]`.
///
/// Continuous across integer lattice boundaries, so adjacent mesh vertices
/// can be displaced without seams.
pub fn noise2d(x: f32, y: f32) -> f32 {
    PERLIN.get([x as f64, y as f64]) as f32
}
