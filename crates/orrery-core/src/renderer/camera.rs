use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::renderer::picking::Ray;

/// Perspective camera for 3D rendering.
/// Y-up, right-handed, depth in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at point in world space.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position, w = 1.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Camera3D {
    pub fn new(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Place the eye and aim it at `target`.
    pub fn look_at(&mut self, position: DVec3, target: DVec3) {
        self.position = position.as_vec3();
        self.target = target.as_vec3();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
        }
    }

    /// Recompute aspect after a viewport resize. Zero-sized viewports
    /// (minimized tabs) are ignored.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        self.aspect = viewport_width / viewport_height;
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates.
    pub fn screen_to_ndc(x: f32, y: f32, viewport_width: f32, viewport_height: f32) -> Vec2 {
        Vec2::new(
            (x / viewport_width) * 2.0 - 1.0,
            -(y / viewport_height) * 2.0 + 1.0,
        )
    }

    /// World-space ray from the eye through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let near = inv * ndc.extend(0.0).extend(1.0);
        let near = near.xyz() / near.w;
        let origin = self.position.as_dvec3();
        Ray::new(origin, near.as_dvec3() - origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera3D {
        let mut cam = Camera3D::new(45.0, 16.0 / 9.0, 0.1, 50_000.0);
        cam.look_at(DVec3::new(200.0, 100.0, 200.0), DVec3::ZERO);
        cam
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "ndc = {ndc:?}");
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut cam = camera();
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.resize(0.0, 600.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn screen_center_maps_to_ndc_origin() {
        let ndc = Camera3D::screen_to_ndc(400.0, 300.0, 800.0, 600.0);
        assert!(ndc.length() < 1e-6);
        let corner = Camera3D::screen_to_ndc(0.0, 0.0, 800.0, 600.0);
        assert_eq!(corner, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (DVec3::ZERO - DVec3::new(200.0, 100.0, 200.0)).normalize();
        assert!((ray.direction - expected).length() < 1e-4, "{:?}", ray.direction);
    }

    #[test]
    fn uniform_is_20_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
        let u = camera().uniform();
        assert_eq!(u.eye, [200.0, 100.0, 200.0, 1.0]);
    }
}
