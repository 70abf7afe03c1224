//! Indexed triangle mesh with CPU-side vertex data.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::math::{Aabb, Ray};

/// Interleaved vertex layout handed to the GPU backend.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh. All attribute vectors have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Append a triangle (counter-clockwise when viewed from the front).
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append a quad `a b c d` (counter-clockwise) as two triangles.
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    /// Merge another mesh into this one.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Apply an affine transform to positions and normals.
    pub fn transform(&mut self, matrix: &Mat4) {
        for p in &mut self.positions {
            *p = matrix.transform_point3(*p);
        }
        let normal_matrix = matrix.inverse().transpose();
        for n in &mut self.normals {
            *n = normal_matrix.transform_vector3(*n).normalize_or_zero();
        }
    }

    /// Builder-style translation.
    pub fn translated(mut self, offset: Vec3) -> Self {
        for p in &mut self.positions {
            *p += offset;
        }
        self
    }

    /// Builder-style transform.
    pub fn transformed(mut self, matrix: Mat4) -> Self {
        self.transform(&matrix);
        self
    }

    /// Recompute smooth vertex normals from triangle faces.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        for n in &mut normals {
            *n = n.normalize_or(Vec3::Y);
        }
        self.normals = normals;
    }

    /// Bounding box of all vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    /// Iterate triangle corner positions.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Nearest ray hit against this mesh after transforming it by `world`.
    pub fn raycast(&self, ray: &Ray, world: &Mat4) -> Option<f32> {
        // Test in local space so the mesh data is never copied
        let inverse = world.inverse();
        let origin = inverse.transform_point3(ray.origin);
        let far_point = inverse.transform_point3(ray.at(1.0));
        let local_dir = far_point - origin;
        let scale = local_dir.length();
        if scale < f32::EPSILON {
            return None;
        }
        let local = Ray::new(origin, local_dir / scale);

        if let Some(bounds) = self.bounds() {
            local.intersects_aabb(&bounds)?;
        }

        self.triangles()
            .filter_map(|[a, b, c]| local.intersects_triangle(a, b, c))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| t / scale)
    }

    /// Interleaved vertices ready for upload.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        (0..self.positions.len())
            .map(|i| MeshVertex {
                position: self.positions[i].to_array(),
                normal: self.normals[i].to_array(),
                uv: self.uvs[i].to_array(),
            })
            .collect()
    }

    /// Raw interleaved vertex bytes.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::Y, Vec2::ZERO);
        let b = mesh.push_vertex(Vec3::new(0.0, 0.0, 1.0), Vec3::Y, Vec2::Y);
        let c = mesh.push_vertex(Vec3::new(1.0, 0.0, 1.0), Vec3::Y, Vec2::ONE);
        let d = mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::Y, Vec2::X);
        mesh.push_quad(a, b, c, d);
        mesh
    }

    #[test]
    fn test_push_quad() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut mesh = unit_quad();
        mesh.append(&unit_quad());
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.indices[6..].iter().all(|&i| i >= 4));
    }

    #[test]
    fn test_compute_normals_points_up() {
        let mut mesh = unit_quad();
        mesh.normals = vec![Vec3::ZERO; 4];
        mesh.compute_normals();
        for n in &mesh.normals {
            assert!((*n - Vec3::Y).length() < 1e-5, "normal {n:?}");
        }
    }

    #[test]
    fn test_raycast_with_transform() {
        let mesh = unit_quad();
        let world = Mat4::from_translation(Vec3::new(10.0, 2.0, 0.0));
        let ray = Ray::new(Vec3::new(10.5, 12.0, 0.5), -Vec3::Y);
        let t = mesh.raycast(&ray, &world).unwrap();
        assert!((t - 10.0).abs() < 1e-4);

        let miss = Ray::new(Vec3::new(0.5, 12.0, 0.5), -Vec3::Y);
        assert!(mesh.raycast(&miss, &world).is_none());
    }

    #[test]
    fn test_vertex_bytes_layout() {
        let mesh = unit_quad();
        assert_eq!(mesh.vertex_bytes().len(), 4 * std::mem::size_of::<MeshVertex>());
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
    }
}
