//! Orbit camera for viewing the garden
//!
//! Drag/zoom handling lives in the host; it mutates the orbit parameters
//! through [`GardenScene::camera_mut`](crate::scene::GardenScene::camera_mut).
//! The core only needs the matrices and screen-to-world rays for hit testing.

use crate::core::types::{Mat4, Vec3, Vec4};
use crate::math::Ray;

/// Camera orbiting a target point
#[derive(Clone, Debug)]
pub struct Camera {
    /// Point the camera orbits around and looks at
    pub target: Vec3,
    /// Distance from target in feet
    pub distance: f32,
    /// Horizontal angle around the target in radians
    pub yaw: f32,
    /// Elevation angle above the ground plane in radians
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

/// Pitch is kept strictly between horizon and zenith.
const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 500.0;

impl Camera {
    /// Create a new camera
    pub fn new(target: Vec3, distance: f32, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            target,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 0.7,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 2000.0,
        }
    }

    /// Camera framing a garden of the given footprint (feet).
    pub fn framing(width: f32, length: f32) -> Self {
        let extent = width.max(length).max(1.0);
        Self::new(Vec3::ZERO, extent * 1.2, 50.0, 16.0 / 9.0)
    }

    /// World position derived from the orbit parameters
    pub fn position(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Rotate around the target.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Multiply the orbit distance (values < 1 zoom in).
    pub fn zoom(&mut self, factor: f32) {
        if factor > 0.0 && factor.is_finite() {
            self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    /// Update aspect ratio (call on viewport resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Build a world-space ray through a pixel of a `width` x `height` viewport.
    ///
    /// Returns `None` for an empty viewport.
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, width: f32, height: f32) -> Option<Ray> {
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let ndc_x = (screen_x / width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / height) * 2.0;

        let inverse = self.view_projection().inverse();
        let near = inverse * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w.abs() < f32::EPSILON || far.w.abs() < f32::EPSILON {
            return None;
        }
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        Some(Ray::new(near, direction))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 40.0, 50.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_respects_distance() {
        let camera = Camera::default();
        let d = (camera.position() - camera.target).length();
        assert!((d - camera.distance).abs() < 1e-3);
        assert!(camera.position().y > 0.0);
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = Camera::default();
        let ray = camera.screen_ray(400.0, 300.0, 800.0, 600.0).unwrap();
        // The ray through the middle of the screen passes through the target
        let to_target = camera.target - ray.origin;
        let t = to_target.dot(ray.direction);
        let closest = ray.at(t);
        assert!((closest - camera.target).length() < 1e-2);
    }

    #[test]
    fn test_screen_ray_rejects_empty_viewport() {
        let camera = Camera::default();
        assert!(camera.screen_ray(0.0, 0.0, 0.0, 600.0).is_none());
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::default();
        camera.orbit(0.0, 10.0);
        assert!((camera.pitch - MAX_PITCH).abs() < 1e-6);
        camera.orbit(0.0, -10.0);
        assert!((camera.pitch - MIN_PITCH).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = Camera::default();
        camera.zoom(0.0001);
        assert!((camera.distance - MIN_DISTANCE).abs() < 1e-6);
        camera.zoom(-2.0);
        assert!((camera.distance - MIN_DISTANCE).abs() < 1e-6);
    }
}
