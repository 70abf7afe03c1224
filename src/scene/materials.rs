//! Palette and texture fallback for generated geometry.

use crate::core::types::{rgb, Color};
use crate::garden::{FrameMaterial, PathMaterial};

use super::config::SceneConfig;
use super::node::Material;

pub const SOIL: Color = rgb(0x4A3526);
pub const GALVANIZED: Color = rgb(0xA8ADB3);
pub const CEDAR: Color = rgb(0xA0522D);
pub const PINE: Color = rgb(0xD8B66A);
pub const CONCRETE: Color = rgb(0x9E9E96);
pub const FENCE_WOOD: Color = rgb(0x8B6B4A);
pub const WIRE: Color = rgb(0x5A5F63);
pub const NETTING: Color = rgb(0x1F2A1F);
pub const STEM: Color = rgb(0x3C6E2E);
pub const BARK: Color = rgb(0x5C4033);

/// Texture name used for the open ground.
pub const GROUND_TEXTURE: &str = "ground";

/// Material for a bed frame.
pub fn frame_material(frame: FrameMaterial) -> Material {
    match frame {
        FrameMaterial::GalvanizedMetal => Material::flat(GALVANIZED).with_roughness(0.35, 0.8),
        FrameMaterial::Cedar => Material::flat(CEDAR).with_roughness(0.8, 0.0),
        FrameMaterial::Pine => Material::flat(PINE).with_roughness(0.75, 0.0),
        FrameMaterial::ConcreteBlock => Material::flat(CONCRETE).with_roughness(0.95, 0.0),
        FrameMaterial::None => Material::flat(SOIL),
    }
}

/// Fallback colour and texture name of a path surface.
pub fn path_surface(material: PathMaterial) -> (Color, &'static str) {
    match material {
        PathMaterial::Gravel => (rgb(0xB5AC9A), "gravel"),
        PathMaterial::Mulch => (rgb(0x6B4A2F), "mulch"),
        PathMaterial::Stone => (rgb(0x8F8F8A), "stone"),
        PathMaterial::Brick => (rgb(0xA5533A), "brick"),
        PathMaterial::Grass => (rgb(0x5E8C3A), "grass"),
        PathMaterial::Dirt => (rgb(0x7A5C3E), "dirt"),
    }
}

/// Textured material when the host has `texture`, else flat `fallback`.
pub fn textured_or_flat(config: &SceneConfig, texture: &str, fallback: Color) -> Material {
    if config.has_texture(texture) {
        Material::flat(fallback).with_texture(texture)
    } else {
        log::warn!("Texture '{}' unavailable, using flat colour", texture);
        Material::flat(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_fallback() {
        let mut config = SceneConfig::default();
        let flat = textured_or_flat(&config, "gravel", [0.5; 3]);
        assert!(flat.texture.is_none());
        assert_eq!(flat.color, [0.5; 3]);

        config.available_textures.insert("gravel".into());
        let textured = textured_or_flat(&config, "gravel", [0.5; 3]);
        assert_eq!(textured.texture.as_deref(), Some("gravel"));
    }

    #[test]
    fn test_wood_frames_differ() {
        assert_ne!(
            frame_material(FrameMaterial::Cedar).color,
            frame_material(FrameMaterial::Pine).color
        );
        assert!(frame_material(FrameMaterial::GalvanizedMetal).metalness > 0.5);
    }

    #[test]
    fn test_path_textures_distinct() {
        let names: std::collections::HashSet<_> = [
            PathMaterial::Gravel,
            PathMaterial::Mulch,
            PathMaterial::Stone,
            PathMaterial::Brick,
            PathMaterial::Grass,
            PathMaterial::Dirt,
        ]
        .into_iter()
        .map(|m| path_surface(m).1)
        .collect();
        assert_eq!(names.len(), 6);
    }
}
