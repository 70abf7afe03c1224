//! Primitive mesh builders.
//!
//! Everything is generated in feet, centred on the origin in X/Z. Solids of
//! revolution (cylinder, cone) sit on y = 0 so they can be stacked; boxes and
//! spheres are centred.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec2, Vec3};

use super::mesh::Mesh;

/// Flat grid in the XZ plane, `segments_x` by `segments_z` cells.
///
/// Vertex order is row-major along X, so vertex `(i, j)` is at
/// `j * (segments_x + 1) + i`.
pub fn grid(width: f32, length: f32, segments_x: u32, segments_z: u32) -> Mesh {
    let sx = segments_x.max(1);
    let sz = segments_z.max(1);
    let mut mesh = Mesh::new();

    for j in 0..=sz {
        let v = j as f32 / sz as f32;
        let z = (v - 0.5) * length;
        for i in 0..=sx {
            let u = i as f32 / sx as f32;
            let x = (u - 0.5) * width;
            mesh.push_vertex(Vec3::new(x, 0.0, z), Vec3::Y, Vec2::new(u, v));
        }
    }

    let row = sx + 1;
    for j in 0..sz {
        for i in 0..sx {
            let a = j * row + i;
            let b = (j + 1) * row + i;
            let c = b + 1;
            let d = a + 1;
            mesh.push_quad(a, b, c, d);
        }
    }
    mesh
}

/// Axis-aligned box centred on the origin.
pub fn cuboid(size: Vec3) -> Mesh {
    let h = size * 0.5;
    let mut mesh = Mesh::new();
    // (normal, u axis, v axis)
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (normal, u_axis, v_axis) in faces {
        let center = normal * h;
        let u = u_axis * h;
        let v = v_axis * h;
        let a = mesh.push_vertex(center - u - v, normal, Vec2::new(0.0, 0.0));
        let b = mesh.push_vertex(center + u - v, normal, Vec2::new(1.0, 0.0));
        let c = mesh.push_vertex(center + u + v, normal, Vec2::new(1.0, 1.0));
        let d = mesh.push_vertex(center - u + v, normal, Vec2::new(0.0, 1.0));
        mesh.push_quad(a, b, c, d);
    }
    mesh
}

/// Capped cylinder (or frustum) standing on y = 0.
pub fn cylinder(radius_bottom: f32, radius_top: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut mesh = Mesh::new();
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);

    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let angle = u * TAU;
        let (sin, cos) = angle.sin_cos();
        let normal = Vec3::new(cos, slope, sin).normalize();
        mesh.push_vertex(
            Vec3::new(cos * radius_bottom, 0.0, sin * radius_bottom),
            normal,
            Vec2::new(u, 0.0),
        );
        mesh.push_vertex(
            Vec3::new(cos * radius_top, height, sin * radius_top),
            normal,
            Vec2::new(u, 1.0),
        );
    }
    for i in 0..segments {
        let b0 = i * 2;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.push_quad(b0, t0, t1, b1);
    }

    if radius_top > 0.0 {
        cap(&mut mesh, radius_top, height, segments, true);
    }
    if radius_bottom > 0.0 {
        cap(&mut mesh, radius_bottom, 0.0, segments, false);
    }
    mesh
}

/// Cone standing on y = 0 with its apex at `height`.
pub fn cone(radius: f32, height: f32, segments: u32) -> Mesh {
    cylinder(radius, 0.0, height, segments)
}

fn cap(mesh: &mut Mesh, radius: f32, y: f32, segments: u32, up: bool) {
    let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
    let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
    let first = mesh.vertex_count() as u32;
    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * TAU;
        let (sin, cos) = angle.sin_cos();
        mesh.push_vertex(
            Vec3::new(cos * radius, y, sin * radius),
            normal,
            Vec2::new(0.5 + cos * 0.5, 0.5 + sin * 0.5),
        );
    }
    for i in 0..segments {
        let a = first + i;
        let b = first + i + 1;
        if up {
            mesh.push_triangle(center, b, a);
        } else {
            mesh.push_triangle(center, a, b);
        }
    }
}

/// UV sphere centred on the origin.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = Mesh::new();

    for j in 0..=hs {
        let v = j as f32 / hs as f32;
        let theta = v * PI;
        for i in 0..=ws {
            let u = i as f32 / ws as f32;
            let phi = u * TAU;
            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.push_vertex(normal * radius, normal, Vec2::new(u, 1.0 - v));
        }
    }

    let row = ws + 1;
    for j in 0..hs {
        for i in 0..ws {
            let a = j * row + i + 1;
            let b = j * row + i;
            let c = (j + 1) * row + i;
            let d = (j + 1) * row + i + 1;
            if j != 0 {
                mesh.push_triangle(a, b, d);
            }
            if j != hs - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }
    mesh
}

/// Flat strip of `width` following a polyline, lying in the XZ plane at the
/// points' own heights. Consecutive duplicate points are skipped.
pub fn ribbon(points: &[Vec3], width: f32) -> Mesh {
    let mut pts: Vec<Vec3> = Vec::with_capacity(points.len());
    for p in points {
        if pts.last().is_none_or(|last: &Vec3| (*last - *p).length_squared() > 1e-8) {
            pts.push(*p);
        }
    }
    let mut mesh = Mesh::new();
    if pts.len() < 2 {
        return mesh;
    }

    let half = width * 0.5;
    let mut distance = 0.0;
    for (i, p) in pts.iter().enumerate() {
        let prev = if i == 0 { *p } else { pts[i - 1] };
        let next = if i + 1 == pts.len() { *p } else { pts[i + 1] };
        let dir = Vec3::new(next.x - prev.x, 0.0, next.z - prev.z).normalize_or(Vec3::X);
        let side = Vec3::new(-dir.z, 0.0, dir.x);
        if i > 0 {
            distance += (*p - pts[i - 1]).length();
        }
        let v = distance / width.max(f32::EPSILON);
        mesh.push_vertex(*p - side * half, Vec3::Y, Vec2::new(0.0, v));
        mesh.push_vertex(*p + side * half, Vec3::Y, Vec2::new(1.0, v));
    }
    for i in 0..(pts.len() as u32 - 1) {
        let l0 = i * 2;
        let r0 = l0 + 1;
        let l1 = l0 + 2;
        let r1 = l0 + 3;
        mesh.push_quad(l0, r0, r1, l1);
    }
    mesh
}

/// Thin tube following a polyline (cables, wires, stems).
pub fn tube(points: &[Vec3], radius: f32, radial_segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    for pair in points.windows(2) {
        if let Some(piece) = rod_between(pair[0], pair[1], radius, radial_segments) {
            mesh.append(&piece);
        }
    }
    mesh
}

/// Uncapped cylinder spanning two points, or `None` if they coincide.
pub fn rod_between(from: Vec3, to: Vec3, radius: f32, radial_segments: u32) -> Option<Mesh> {
    let axis = to - from;
    let length = axis.length();
    if length < 1e-5 {
        return None;
    }
    let mut rod = cylinder(radius, radius, length, radial_segments);
    // Drop the caps: the first 2 * (segments + 1) vertices are the wall
    let wall_vertices = 2 * (radial_segments.max(3) + 1) as usize;
    let wall_indices = radial_segments.max(3) as usize * 6;
    rod.positions.truncate(wall_vertices);
    rod.normals.truncate(wall_vertices);
    rod.uvs.truncate(wall_vertices);
    rod.indices.truncate(wall_indices);

    let rotation = Quat::from_rotation_arc(Vec3::Y, axis / length);
    let matrix = glam::Mat4::from_rotation_translation(rotation, from);
    Some(rod.transformed(matrix))
}
