//! Damped spherical orbit camera.
//!
//! Pointer input accumulates into `pending` (raw angular velocity); each
//! `update()` moves the settled pose a `damping_factor` fraction of the
//! outstanding delta and decays the delta by the complementary fraction.
//! Nothing here can fail: out-of-range input is clamped.

use std::f64::consts::{FRAC_PI_3, PI};

use glam::{DVec2, DVec3};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::renderer::camera::Camera3D;

/// Primary (left) pointer button id.
pub const PRIMARY_BUTTON: u32 = 0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Orbit radius at zoom scale 1.
    pub base_radius: f64,
    /// Orbit radius after `focus_on_object`.
    pub focus_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub rotate_speed: f64,
    /// Pixel-to-radian scale applied with `rotate_speed`.
    pub rotate_scale: f64,
    pub zoom_speed: f64,
    pub damping_factor: f64,
    pub phi_min: f64,
    pub phi_max: f64,
    pub initial_position: [f64; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            base_radius: 200.0,
            focus_radius: 30.0,
            min_radius: 10.0,
            max_radius: 20_000.0,
            min_scale: 1.0,
            max_scale: 100.0,
            rotate_speed: 0.5,
            rotate_scale: 0.01,
            zoom_speed: 0.1,
            damping_factor: 0.05,
            phi_min: 0.1,
            phi_max: PI - 0.1,
            initial_position: [200.0, 100.0, 200.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 50_000.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: String| Err(ConfigError::InvalidValue { field, reason });

        if !(self.base_radius > 0.0) {
            return invalid("camera.base_radius", format!("must be positive, got {}", self.base_radius));
        }
        if !(self.focus_radius > 0.0) {
            return invalid("camera.focus_radius", format!("must be positive, got {}", self.focus_radius));
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return invalid(
                "camera.min_radius",
                format!("need 0 < min_radius <= max_radius, got {}..{}", self.min_radius, self.max_radius),
            );
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return invalid(
                "camera.min_scale",
                format!("need 0 < min_scale <= max_scale, got {}..{}", self.min_scale, self.max_scale),
            );
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return invalid("camera.damping_factor", format!("must be in (0, 1], got {}", self.damping_factor));
        }
        if !(self.phi_min > 0.0 && self.phi_min < self.phi_max && self.phi_max < PI) {
            return invalid(
                "camera.phi_min",
                format!("need 0 < phi_min < phi_max < pi, got {}..{}", self.phi_min, self.phi_max),
            );
        }
        if !(self.zoom_speed > 0.0) {
            return invalid("camera.zoom_speed", format!("must be positive, got {}", self.zoom_speed));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return invalid("camera.near", format!("need 0 < near < far, got {}..{}", self.near, self.far));
        }
        Ok(())
    }

    /// Zoom scale 1 pulled into `[min_scale, max_scale]`.
    fn default_scale(&self) -> f64 {
        self.min_scale.max(1.0).min(self.max_scale)
    }
}

/// Spherical coordinates around a target: `phi` from +Y, `theta` around Y from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f64,
    pub theta: f64,
    pub phi: f64,
}

impl Spherical {
    pub fn new(radius: f64, theta: f64, phi: f64) -> Self {
        Self { radius, theta, phi }
    }

    pub fn from_offset(offset: DVec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> DVec3 {
        let sin_phi = self.phi.sin();
        DVec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }
}

/// Outstanding angular input not yet applied to the pose.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphericalDelta {
    pub theta: f64,
    pub phi: f64,
}

pub struct CameraController {
    config: CameraConfig,
    target: DVec3,
    spherical: Spherical,
    pending: SphericalDelta,
    scale: f64,
    base_radius: f64,
    drag_active: bool,
    last_pointer: DVec2,
    camera: Camera3D,
}

impl CameraController {
    pub fn new(config: CameraConfig, aspect: f32) -> Self {
        let camera = Camera3D::new(config.fov_y_degrees, aspect, config.near, config.far);
        let spherical = Spherical::from_offset(DVec3::from_array(config.initial_position));
        let mut controller = Self {
            target: DVec3::ZERO,
            spherical,
            pending: SphericalDelta::default(),
            scale: config.default_scale(),
            base_radius: config.base_radius,
            drag_active: false,
            last_pointer: DVec2::ZERO,
            camera,
            config,
        };
        controller.update();
        controller
    }

    // ── Input ──

    pub fn on_pointer_down(&mut self, button: u32, x: f64, y: f64) {
        if button != PRIMARY_BUTTON || !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.drag_active = true;
        self.last_pointer = DVec2::new(x, y);
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.drag_active || !(x.is_finite() && y.is_finite()) {
            return;
        }
        let pointer = DVec2::new(x, y);
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;

        let k = self.config.rotate_speed * self.config.rotate_scale;
        self.pending.theta -= delta.x * k;
        self.pending.phi -= delta.y * k;
        // Per-frame update runs too; this second call only speeds convergence.
        self.update();
    }

    /// Ends the drag. Pending momentum keeps decaying over later updates.
    pub fn on_pointer_up(&mut self) {
        self.drag_active = false;
    }

    /// Positive `delta_y` zooms out, negative zooms in, zero is ignored.
    pub fn on_scroll(&mut self, delta_y: f64) {
        let factor = 1.0 + self.config.zoom_speed;
        if delta_y > 0.0 {
            self.scale *= factor;
        } else if delta_y < 0.0 {
            self.scale /= factor;
        }
        self.scale = self.scale.clamp(self.config.min_scale, self.config.max_scale);
        self.update();
    }

    // ── Integration ──

    /// One damped integration step; re-aims the camera at the target.
    pub fn update(&mut self) {
        let damping = self.config.damping_factor;
        self.spherical.theta += self.pending.theta * damping;
        self.spherical.phi += self.pending.phi * damping;
        self.spherical.phi = self.spherical.phi.clamp(self.config.phi_min, self.config.phi_max);
        self.spherical.radius =
            (self.base_radius * self.scale).clamp(self.config.min_radius, self.config.max_radius);

        let position = self.target + self.spherical.to_offset();
        self.camera.look_at(position, self.target);

        self.pending.theta *= 1.0 - damping;
        self.pending.phi *= 1.0 - damping;
    }

    /// Aim at `world_position` from the close-up distance. Zoom resets to 1
    /// so the close-up distance holds until the user zooms again.
    pub fn focus_on_object(&mut self, world_position: DVec3) {
        self.target = world_position;
        self.base_radius = self.config.focus_radius;
        self.scale = self.config.default_scale();
        log::debug!("camera: focus on {world_position:?}");
        self.update();
    }

    /// Back to the origin at the default distance and elevation.
    pub fn reset(&mut self) {
        self.target = DVec3::ZERO;
        self.scale = self.config.default_scale();
        self.base_radius = self.config.base_radius;
        self.spherical = Spherical::new(self.config.base_radius, 0.0, FRAC_PI_3);
        self.pending = SphericalDelta::default();
        log::debug!("camera: reset");
        self.update();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    // ── Accessors ──

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn position(&self) -> DVec3 {
        self.target + self.spherical.to_offset()
    }

    pub fn target(&self) -> DVec3 {
        self.target
    }

    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    pub fn pending(&self) -> SphericalDelta {
        self.pending
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_active
    }
}
