//! Procedural plants, one generator per plant type.
//!
//! Shapes vary per plant from a `StdRng` seeded with a hash of the plant id,
//! so a rebuild of the same garden reproduces the same plants.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::types::Color;
use crate::garden::{Plant, PlantType};
use crate::geometry::{primitives, Mesh};
use crate::scene::materials::{BARK, STEM};
use crate::scene::node::{LocalTransform, Material};

use super::Part;

/// Stable 32-bit FNV-1a hash of a plant id.
pub fn plant_hash(id: &str) -> u32 {
    let mut hash: u32 = 0x811C_9DC5;
    for byte in id.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

/// Variation stream for a plant, seeded by its id hash.
fn variation(id: &str) -> StdRng {
    StdRng::seed_from_u64(plant_hash(id) as u64)
}

/// Uniform draw in `[0, 1)`.
fn unit(v: &mut StdRng) -> f32 {
    v.gen_range(0.0..1.0)
}

/// Transform placing a plant at `base` with a hashed yaw and its scale.
pub fn plant_transform(plant: &Plant, base: Vec3) -> LocalTransform {
    let yaw = (plant_hash(&plant.id) % 360) as f32 / 360.0 * TAU;
    LocalTransform {
        position: base,
        rotation: Quat::from_rotation_y(yaw),
        scale: plant.scale.max(0.01),
    }
}

/// Parts of a plant in plant-local space (base at the origin).
pub fn build_plant(plant: &Plant) -> Vec<Part> {
    let mut v = variation(&plant.id);
    let color = plant.rgb();
    let parts = match plant.plant_type {
        PlantType::Flower => flower(&mut v, color),
        PlantType::Shrub => shrub(&mut v, color),
        PlantType::Tree => tree(&mut v, color),
        PlantType::Vegetable => vegetable(&mut v, color),
        PlantType::Herb => herb(&mut v, color),
        PlantType::Grass => grass(&mut v, color),
    };
    parts.into_iter().filter(|p| !p.mesh.is_empty()).collect()
}

fn shade(color: Color, factor: f32) -> Color {
    color.map(|c| (c * factor).clamp(0.0, 1.0))
}

fn leafy(color: Color) -> Material {
    Material::flat(color).with_roughness(0.85, 0.0)
}

fn flower(v: &mut StdRng, color: Color) -> Vec<Part> {
    let height: f32 = v.gen_range(0.8..1.4);
    let mut stem = primitives::cylinder(0.03, 0.02, height, 6);

    let leaf_count = 2 + (unit(v) * 2.0) as u32;
    for i in 0..leaf_count {
        let angle = i as f32 / leaf_count as f32 * TAU + unit(v);
        let y = height * v.gen_range::<f32, _>(0.2..0.6);
        let leaf = primitives::sphere(0.12, 6, 4)
            .transformed(Mat4::from_scale_rotation_translation(
                Vec3::new(1.0, 0.25, 0.5),
                Quat::from_rotation_y(angle),
                Vec3::new(angle.cos() * 0.1, y, -angle.sin() * 0.1),
            ));
        stem.append(&leaf);
    }

    let radius: f32 = v.gen_range(0.12..0.2);
    let bloom = primitives::sphere(radius, 10, 6)
        .transformed(Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 0.6, 1.0),
            Quat::IDENTITY,
            Vec3::new(0.0, height, 0.0),
        ));

    vec![
        Part::new("stem", stem, leafy(STEM)),
        Part::new("bloom", bloom, leafy(color)),
    ]
}

fn shrub(v: &mut StdRng, color: Color) -> Vec<Part> {
    let mut foliage = Mesh::new();
    let clumps = 3 + (unit(v) * 3.0) as u32;
    for i in 0..clumps {
        let angle = i as f32 / clumps as f32 * TAU + unit(v) * 0.5;
        let spread: f32 = v.gen_range(0.2..0.5);
        let radius: f32 = v.gen_range(0.45..0.75);
        let center = Vec3::new(angle.cos() * spread, radius * 0.8, angle.sin() * spread);
        foliage.append(&primitives::sphere(radius, 10, 7).translated(center));
    }
    vec![Part::new("foliage", foliage, leafy(color))]
}

fn tree(v: &mut StdRng, color: Color) -> Vec<Part> {
    let trunk_height: f32 = v.gen_range(3.0..5.0);
    let trunk = primitives::cylinder(0.35, 0.22, trunk_height, 8);

    let mut canopy = Mesh::new();
    let radius: f32 = v.gen_range(1.8..2.6);
    canopy.append(&primitives::sphere(radius, 14, 10).translated(Vec3::Y * (trunk_height + radius * 0.6)));
    for i in 0..3 {
        let angle = i as f32 / 3.0 * TAU + unit(v);
        let r = radius * v.gen_range::<f32, _>(0.55..0.75);
        let offset = Vec3::new(angle.cos() * radius * 0.6, trunk_height + r * 0.4, angle.sin() * radius * 0.6);
        canopy.append(&primitives::sphere(r, 10, 7).translated(offset));
    }

    vec![
        Part::new("trunk", trunk, Material::flat(BARK).with_roughness(0.95, 0.0)),
        Part::new("canopy", canopy, leafy(color)),
    ]
}

fn vegetable(v: &mut StdRng, color: Color) -> Vec<Part> {
    let mut leaves = Mesh::new();
    let leaf_count = 5 + (unit(v) * 3.0) as u32;
    for i in 0..leaf_count {
        let angle = i as f32 / leaf_count as f32 * TAU;
        let tilt: f32 = v.gen_range(0.4..0.8);
        let leaf = primitives::sphere(0.25, 6, 4).transformed(Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, 0.2, 0.45),
            Quat::from_rotation_y(angle) * Quat::from_rotation_z(tilt),
            Vec3::new(angle.cos() * 0.2, 0.25, -angle.sin() * 0.2),
        ));
        leaves.append(&leaf);
    }

    let mut fruit = Mesh::new();
    let fruit_count = 2 + (unit(v) * 3.0) as u32;
    for _ in 0..fruit_count {
        let angle = unit(v) * TAU;
        let spread: f32 = v.gen_range(0.1..0.3);
        let radius: f32 = v.gen_range(0.08..0.14);
        fruit.append(
            &primitives::sphere(radius, 8, 6).translated(Vec3::new(angle.cos() * spread, v.gen_range(0.2..0.5), angle.sin() * spread)),
        );
    }

    vec![
        Part::new("leaves", leaves, leafy(STEM)),
        Part::new("fruit", fruit, Material::flat(color).with_roughness(0.5, 0.0)),
    ]
}

fn herb(v: &mut StdRng, color: Color) -> Vec<Part> {
    let mut sprigs = Mesh::new();
    let count = 5 + (unit(v) * 4.0) as u32;
    for i in 0..count {
        let angle = i as f32 / count as f32 * TAU + unit(v) * 0.3;
        let spread: f32 = v.gen_range(0.05..0.2);
        let height: f32 = v.gen_range(0.4..0.7);
        let lean = Quat::from_rotation_arc(Vec3::Y, Vec3::new(angle.cos() * 0.2, 1.0, angle.sin() * 0.2).normalize());
        sprigs.append(&primitives::cone(0.05, height, 5).transformed(Mat4::from_rotation_translation(
            lean,
            Vec3::new(angle.cos() * spread, 0.0, angle.sin() * spread),
        )));
    }
    vec![Part::new("sprigs", sprigs, leafy(color))]
}

fn grass(v: &mut StdRng, color: Color) -> Vec<Part> {
    let mut blades = Mesh::new();
    let count = 8 + (unit(v) * 6.0) as u32;
    for _ in 0..count {
        let angle = unit(v) * TAU;
        let spread: f32 = v.gen_range(0.0..0.25);
        let height: f32 = v.gen_range(0.5..1.0);
        let base = Vec3::new(angle.cos() * spread, 0.0, angle.sin() * spread);
        let lean = Quat::from_rotation_arc(
            Vec3::Y,
            Vec3::new(angle.cos() * 0.3, 1.0, angle.sin() * 0.3).normalize(),
        );
        blades.append(&primitives::cone(0.02, height, 3).transformed(Mat4::from_rotation_translation(lean, base)));
    }
    vec![Part::new("blades", blades, leafy(shade(color, 1.1)))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::LayoutPoint;

    fn plant(id: &str, plant_type: PlantType) -> Plant {
        Plant {
            id: id.into(),
            name: String::new(),
            plant_type,
            position: LayoutPoint::default(),
            scale: 1.0,
            color: "#cc3366".into(),
        }
    }

    const ALL: [PlantType; 6] = [
        PlantType::Flower,
        PlantType::Shrub,
        PlantType::Tree,
        PlantType::Vegetable,
        PlantType::Herb,
        PlantType::Grass,
    ];

    #[test]
    fn test_every_type_builds() {
        for t in ALL {
            let parts = build_plant(&plant("p1", t));
            assert!(!parts.is_empty(), "{t:?} produced nothing");
            for part in &parts {
                let bounds = part.mesh.bounds().unwrap();
                assert!(bounds.min.y >= -0.5, "{t:?} {} sinks below ground", part.name);
            }
        }
    }

    #[test]
    fn test_same_id_same_plant() {
        let a = build_plant(&plant("tomato-3", PlantType::Vegetable));
        let b = build_plant(&plant("tomato-3", PlantType::Vegetable));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.mesh, y.mesh);
        }
    }

    #[test]
    fn test_ids_vary_shape() {
        let a = build_plant(&plant("rose-1", PlantType::Flower));
        let b = build_plant(&plant("rose-2", PlantType::Flower));
        assert_ne!(a[0].mesh, b[0].mesh);
    }

    #[test]
    fn test_trees_tower_over_herbs() {
        let height = |t| {
            build_plant(&plant("x", t))
                .iter()
                .filter_map(|p| p.mesh.bounds())
                .map(|b| b.max.y)
                .fold(0.0f32, f32::max)
        };
        assert!(height(PlantType::Tree) > 4.0);
        assert!(height(PlantType::Herb) < 1.0);
    }

    #[test]
    fn test_plant_colour_applied() {
        let parts = build_plant(&plant("p", PlantType::Flower));
        let bloom = parts.iter().find(|p| p.name == "bloom").unwrap();
        assert!((bloom.material.color[0] - 0.8).abs() < 0.01);
    }

    #[test]
    fn test_transform_uses_scale_and_hash() {
        let mut p = plant("basil", PlantType::Herb);
        p.scale = 2.0;
        let t = plant_transform(&p, Vec3::new(1.0, 0.5, 2.0));
        assert_eq!(t.scale, 2.0);
        assert_eq!(t.position, Vec3::new(1.0, 0.5, 2.0));
        assert_eq!(t.rotation, plant_transform(&p, Vec3::ZERO).rotation);
    }

    #[test]
    fn test_hash_stable() {
        assert_eq!(plant_hash(""), 0x811C_9DC5);
        assert_eq!(plant_hash("a"), 0xE40C_292C);
    }
}
