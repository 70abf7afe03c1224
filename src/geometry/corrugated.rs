//! Corrugated sheet-metal panels for galvanized raised beds.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::mesh::Mesh;

/// Columns of vertices per ripple.
const SEGMENTS_PER_RIPPLE: u32 = 8;

/// Whole ripples that fit across a panel, at least one.
pub fn ripple_count(width: f32, wavelength: f32) -> u32 {
    if wavelength <= 0.0 || width <= 0.0 {
        return 1;
    }
    ((width / wavelength).round() as u32).max(1)
}

/// Out-of-plane offset of column `segment` out of `segments` columns.
///
/// The phase is scaled so `ripples` full sine periods span the panel.
pub fn corrugation_offset(segment: u32, segments: u32, ripples: u32, depth: f32) -> f32 {
    if segments == 0 {
        return 0.0;
    }
    let phase = segment as f32 / segments as f32 * ripples as f32 * TAU;
    depth * phase.sin()
}

/// Corrugated panel in the XY plane, centred on x = 0, standing on y = 0,
/// rippling along Z. Normals face +Z.
pub fn corrugated_panel(width: f32, height: f32, depth: f32, wavelength: f32) -> Mesh {
    let ripples = ripple_count(width, wavelength);
    let segments = ripples * SEGMENTS_PER_RIPPLE;
    let mut mesh = Mesh::new();

    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let x = (u - 0.5) * width;
        let z = corrugation_offset(i, segments, ripples, depth);
        mesh.push_vertex(Vec3::new(x, 0.0, z), Vec3::Z, Vec2::new(u, 0.0));
        mesh.push_vertex(Vec3::new(x, height, z), Vec3::Z, Vec2::new(u, 1.0));
    }
    for i in 0..segments {
        let b0 = i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.push_quad(b0, b1, t1, t0);
    }
    mesh.compute_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ripple_count() {
        assert_eq!(ripple_count(8.0, 0.25), 32);
        assert_eq!(ripple_count(0.1, 0.25), 1);
        assert_eq!(ripple_count(4.0, 0.0), 1);
    }

    #[test]
    fn test_offset_bounded_by_depth() {
        let segments = 64;
        for i in 0..=segments {
            let z = corrugation_offset(i, segments, 8, 0.1);
            assert!(z.abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn test_offset_zero_at_panel_ends() {
        assert!(corrugation_offset(0, 64, 8, 0.1).abs() < 1e-6);
        assert!(corrugation_offset(64, 64, 8, 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_panel_shape() {
        let mesh = corrugated_panel(4.0, 1.5, 0.05, 0.25);
        let b = mesh.bounds().unwrap();
        assert!((b.size().x - 4.0).abs() < 1e-4);
        assert!((b.size().y - 1.5).abs() < 1e-4);
        assert!(b.max.z <= 0.05 + 1e-5);
        assert!(b.min.z >= -0.05 - 1e-5);
        assert_eq!(mesh.triangle_count(), 16 * SEGMENTS_PER_RIPPLE as usize * 2);
    }

    #[test]
    fn test_panel_faces_forward() {
        let mesh = corrugated_panel(2.0, 1.0, 0.05, 0.5);
        let avg_z: f32 = mesh.normals.iter().map(|n| n.z).sum::<f32>() / mesh.normals.len() as f32;
        assert!(avg_z > 0.5, "average normal z = {avg_z}");
    }
}
