//! Raised beds: soil mound plus a frame chosen by material.
//!
//! All parts are in bed-local space: origin at the bed centre on the ground,
//! X along the bed's width, Z along its length.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Quat, Vec3};

use crate::garden::{Bed, FrameMaterial};
use crate::geometry::{corrugated_panel, primitives, Mesh};
use crate::scene::config::{SceneConfig, StructureConfig};
use crate::scene::materials::{frame_material, SOIL};
use crate::scene::node::Material;
use crate::terrain::{soil_displacement_field, soil_height, SoilParams};

use super::Part;

/// Height of one wooden plank course (feet).
pub const PLANK_HEIGHT: f32 = 0.5;
/// Wooden wall thickness (feet).
pub const PLANK_THICKNESS: f32 = 0.125;
/// Corner post cross-section (feet).
pub const CORNER_POST: f32 = 0.29;
/// Concrete block dimensions: 16 x 8 x 8 inches.
pub const BLOCK_LENGTH: f32 = 16.0 / 12.0;
pub const BLOCK_HEIGHT: f32 = 8.0 / 12.0;
pub const BLOCK_DEPTH: f32 = 8.0 / 12.0;
/// Mortar gap between blocks (feet).
const BLOCK_GAP: f32 = 0.02;
/// Soil sits this far below the top of the frame (feet).
const SOIL_BELOW_RIM: f32 = 0.1;
/// Radius of the rolled rim on metal beds (feet).
const RIM_RADIUS: f32 = 0.06;

/// Thickness of the frame walls for a material.
pub fn wall_thickness(frame: FrameMaterial) -> f32 {
    match frame {
        FrameMaterial::GalvanizedMetal => 0.05,
        FrameMaterial::Cedar | FrameMaterial::Pine => PLANK_THICKNESS,
        FrameMaterial::ConcreteBlock => BLOCK_DEPTH,
        FrameMaterial::None => 0.0,
    }
}

/// Soil footprint inside the frame walls.
pub fn soil_footprint(bed: &Bed) -> (f32, f32) {
    let wall = wall_thickness(bed.frame_material);
    (
        (bed.width - 2.0 * wall).max(0.1),
        (bed.length - 2.0 * wall).max(0.1),
    )
}

/// Soil parameters for a bed: level with the frame top, or a bare mound.
pub fn soil_params(bed: &Bed, base: &SoilParams) -> SoilParams {
    let base_height = match bed.frame_material {
        FrameMaterial::None => 0.0,
        _ => (bed.height - SOIL_BELOW_RIM).max(0.0),
    };
    SoilParams {
        base_height,
        ..base.clone()
    }
}

/// Soil surface height at bed-local `(x, z)`; used to seat plants.
pub fn soil_surface(bed: &Bed, origin: (f32, f32), config: &SceneConfig, x: f32, z: f32) -> f32 {
    let (width, length) = soil_footprint(bed);
    let params = soil_params(bed, &config.ground.soil);
    soil_height(x, z, width, length, origin, &params)
}

/// Soil mound and frame parts for `bed`. `origin` is the bed centre in world (x, z).
pub fn build_bed(bed: &Bed, origin: (f32, f32), config: &SceneConfig) -> Vec<Part> {
    let mut parts = vec![build_soil(bed, origin, config)];
    let material = frame_material(bed.frame_material);
    let s = &config.structures;

    match bed.frame_material {
        FrameMaterial::GalvanizedMetal => {
            parts.push(Part::new("frame", galvanized_walls(bed, s), material.clone()));
            parts.push(Part::new("rim", rolled_rim(bed), material));
        }
        FrameMaterial::Cedar | FrameMaterial::Pine => {
            parts.push(Part::new("frame", plank_walls(bed), material.clone()));
            parts.push(Part::new("posts", corner_posts(bed), material));
        }
        FrameMaterial::ConcreteBlock => {
            parts.push(Part::new("frame", block_walls(bed), material));
        }
        FrameMaterial::None => {}
    }
    parts.retain(|p| !p.mesh.is_empty());
    parts
}

fn build_soil(bed: &Bed, origin: (f32, f32), config: &SceneConfig) -> Part {
    let (width, length) = soil_footprint(bed);
    let cells_x = ((width * 4.0).ceil() as u32).clamp(2, 64);
    let cells_z = ((length * 4.0).ceil() as u32).clamp(2, 64);
    let params = soil_params(bed, &config.ground.soil);

    let mut mesh = primitives::grid(width, length, cells_x, cells_z);
    let field = soil_displacement_field(width, length, cells_x, cells_z, origin, &params);
    for (p, h) in mesh.positions.iter_mut().zip(field) {
        p.y = h;
    }
    mesh.compute_normals();
    Part::new("soil", mesh, Material::flat(SOIL))
}

/// Place a wall piece built along local +X (centred) onto one side of the bed.
fn side_transform(bed: &Bed, side: usize) -> Mat4 {
    let hw = bed.width * 0.5;
    let hl = bed.length * 0.5;
    // (yaw, offset): +Z of the piece faces outward
    let (yaw, offset) = match side {
        0 => (0.0, Vec3::new(0.0, 0.0, hl)),
        1 => (PI, Vec3::new(0.0, 0.0, -hl)),
        2 => (FRAC_PI_2, Vec3::new(hw, 0.0, 0.0)),
        _ => (-FRAC_PI_2, Vec3::new(-hw, 0.0, 0.0)),
    };
    Mat4::from_rotation_translation(Quat::from_rotation_y(yaw), offset)
}

/// Length of side `side` (0/1 run along X, 2/3 along Z).
fn side_length(bed: &Bed, side: usize) -> f32 {
    if side < 2 { bed.width } else { bed.length }
}

fn galvanized_walls(bed: &Bed, structures: &StructureConfig) -> Mesh {
    let mut mesh = Mesh::new();
    for side in 0..4 {
        let panel = corrugated_panel(
            side_length(bed, side),
            bed.height,
            structures.corrugation_depth,
            structures.corrugation_wavelength,
        );
        mesh.append(&panel.transformed(side_transform(bed, side)));
    }
    mesh
}

fn rolled_rim(bed: &Bed) -> Mesh {
    let hw = bed.width * 0.5;
    let hl = bed.length * 0.5;
    let y = bed.height;
    let corners = [
        Vec3::new(-hw, y, -hl),
        Vec3::new(hw, y, -hl),
        Vec3::new(hw, y, hl),
        Vec3::new(-hw, y, hl),
        Vec3::new(-hw, y, -hl),
    ];
    primitives::tube(&corners, RIM_RADIUS, 8)
}

fn plank_walls(bed: &Bed) -> Mesh {
    let mut mesh = Mesh::new();
    let t = PLANK_THICKNESS;
    let courses = (bed.height / PLANK_HEIGHT).ceil().max(1.0) as u32;
    for course in 0..courses {
        let bottom = course as f32 * PLANK_HEIGHT;
        let h = (bed.height - bottom).min(PLANK_HEIGHT);
        if h <= 1e-3 {
            break;
        }
        // Small reveal between boards
        let board = (h - 0.02).max(h * 0.9);
        let y = bottom + board * 0.5;
        for side in 0..4 {
            let run = if side < 2 {
                side_length(bed, side)
            } else {
                side_length(bed, side) - 2.0 * t
            };
            let plank = primitives::cuboid(Vec3::new(run, board, t))
                .translated(Vec3::new(0.0, y, -t * 0.5));
            mesh.append(&plank.transformed(side_transform(bed, side)));
        }
    }
    mesh
}

fn corner_posts(bed: &Bed) -> Mesh {
    let mut mesh = Mesh::new();
    let height = bed.height + 0.1;
    let inset = PLANK_THICKNESS + CORNER_POST * 0.5;
    let hx = bed.width * 0.5 - inset;
    let hz = bed.length * 0.5 - inset;
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        let post = primitives::cuboid(Vec3::new(CORNER_POST, height, CORNER_POST))
            .translated(Vec3::new(sx * hx, height * 0.5, sz * hz));
        mesh.append(&post);
    }
    mesh
}

/// Block intervals covering `[0, length]` with the first joint shifted by
/// `offset`. The end blocks are cut to fit.
pub fn block_runs(length: f32, block: f32, offset: f32) -> Vec<(f32, f32)> {
    let mut runs = Vec::new();
    if length <= 0.0 || block <= 0.0 {
        return runs;
    }
    let mut start = -offset.rem_euclid(block);
    while start < length {
        let a = start.max(0.0);
        let b = (start + block).min(length);
        if b - a > BLOCK_GAP * 2.0 {
            runs.push((a, b));
        }
        start += block;
    }
    runs
}

fn block_walls(bed: &Bed) -> Mesh {
    let mut mesh = Mesh::new();
    let courses = (bed.height / BLOCK_HEIGHT).ceil().max(1.0) as u32;
    for course in 0..courses {
        let bottom = course as f32 * BLOCK_HEIGHT;
        let h = (bed.height - bottom).min(BLOCK_HEIGHT);
        if h <= 1e-3 {
            break;
        }
        // Running bond: every other course shifts by half a block
        let offset = if course % 2 == 1 { BLOCK_LENGTH * 0.5 } else { 0.0 };
        for side in 0..4 {
            let run = if side < 2 {
                side_length(bed, side)
            } else {
                side_length(bed, side) - 2.0 * BLOCK_DEPTH
            };
            for (a, b) in block_runs(run, BLOCK_LENGTH, offset) {
                let len = b - a - BLOCK_GAP;
                let center_x = -run * 0.5 + (a + b) * 0.5;
                let block = primitives::cuboid(Vec3::new(len, h - BLOCK_GAP, BLOCK_DEPTH))
                    .translated(Vec3::new(center_x, bottom + h * 0.5, -BLOCK_DEPTH * 0.5));
                mesh.append(&block.transformed(side_transform(bed, side)));
            }
        }
    }
    mesh
}
