//! Displaced ground plane under the whole garden.

use crate::garden::GardenDescription;
use crate::geometry::primitives;
use crate::terrain::{displace_grid, ground_height};

use crate::scene::config::SceneConfig;
use crate::scene::materials::{textured_or_flat, GROUND_TEXTURE};

use super::Part;

/// Upper bound on ground grid cells per axis.
const MAX_CELLS: u32 = 400;

/// Ground covering the garden plus the configured margin.
pub fn build_ground(garden: &GardenDescription, config: &SceneConfig) -> Part {
    let ground = &config.ground;
    let width = garden.width.max(0.0) + ground.margin * 2.0;
    let length = garden.length.max(0.0) + ground.margin * 2.0;
    let cells_x = ((width * ground.cells_per_foot).ceil() as u32).clamp(1, MAX_CELLS);
    let cells_z = ((length * ground.cells_per_foot).ceil() as u32).clamp(1, MAX_CELLS);

    let mut mesh = primitives::grid(width, length, cells_x, cells_z);
    displace_grid(&mut mesh, |x, z| ground_height(x, z, &ground.ground));

    let material = textured_or_flat(config, GROUND_TEXTURE, garden.ground_rgb());
    log::debug!("Ground: {:.0}x{:.0} ft, {}x{} cells", width, length, cells_x, cells_z);
    Part::new("ground", mesh, material)
}
