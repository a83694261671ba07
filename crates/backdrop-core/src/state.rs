//! Camera and per-tick input types shared with the frontends.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! use on both native and web targets.

use crate::color::Theme;
use crate::constants::{CAMERA_FOVY_DEGREES, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio from a viewport size; zero sizes are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// World-space point under normalized device coordinates on the plane
    /// `z = plane_z`.
    ///
    /// Casts a ray from the near to the far clip plane through `ndc`. When the
    /// ray runs parallel to the plane the near-plane point is returned with its
    /// depth replaced.
    pub fn unproject_to_plane(&self, ndc: Vec2, plane_z: f32) -> Vec3 {
        let inv = self.view_proj().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near: Vec3 = p_near.truncate() / p_near.w;
        let far: Vec3 = p_far.truncate() / p_far.w;
        let rd = far - near;
        if !near.is_finite() || !rd.is_finite() {
            return Vec3::new(ndc.x, ndc.y, plane_z);
        }
        if rd.z.abs() <= 1e-6 {
            return Vec3::new(near.x, near.y, plane_z);
        }
        let t = (plane_z - near.z) / rd.z;
        let hit = near + rd * t;
        Vec3::new(hit.x, hit.y, plane_z)
    }
}

/// One consistent sample of the external signals, taken once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer in normalized device coordinates, `[-1, 1]` on both axes.
    pub pointer_ndc: Vec2,
    /// Scroll offset as a fraction of scrollable page height.
    pub scroll_fraction: f32,
    pub theme: Theme,
}

/// Something that can be polled for the current external signals.
pub trait InputSource {
    fn sample(&self) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn sample(&self) -> InputSnapshot {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_screen_hits_origin() {
        let cam = Camera::default();
        let p = cam.unproject_to_plane(Vec2::ZERO, 0.0);
        assert!(p.length() < 1e-3, "{p:?}");
    }

    #[test]
    fn right_edge_maps_to_positive_x_on_plane() {
        let mut cam = Camera::default();
        cam.set_viewport(1600, 900);
        let p = cam.unproject_to_plane(Vec2::new(1.0, 0.0), 0.0);
        // half-width of the frustum at distance 20 with 75 deg fovy and 16:9
        let expected = 20.0 * (cam.fovy_radians * 0.5).tan() * cam.aspect;
        assert!((p.x - expected).abs() < 0.05, "{} vs {}", p.x, expected);
        assert!(p.y.abs() < 1e-3);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn zero_viewport_keeps_aspect() {
        let mut cam = Camera::default();
        cam.set_viewport(800, 400);
        cam.set_viewport(0, 400);
        assert_eq!(cam.aspect, 2.0);
    }
}
