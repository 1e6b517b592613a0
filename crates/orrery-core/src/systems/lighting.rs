//! Scene lighting rig handed to the host renderer as plain data.
//!
//! The sun is the only light source: one point light riding on the root
//! body plus a dim ambient term.

use glam::DVec3;
use serde::Serialize;

use crate::api::types::Rgb;

/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance in world units.
    pub range: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: DVec3, color: Rgb, intensity: f32, range: f32) -> Self {
        let [r, g, b] = color.to_array();
        Self {
            x: pos.x as f32,
            y: pos.y as f32,
            z: pos.z as f32,
            r,
            g,
            b,
            intensity,
            range,
        }
    }

    pub fn with_pos(mut self, pos: DVec3) -> Self {
        self.x = pos.x as f32;
        self.y = pos.y as f32;
        self.z = pos.z as f32;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
}

impl LightState {
    pub const DEFAULT_AMBIENT: Rgb = Rgb::from_u32(0x333333);

    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: Self::DEFAULT_AMBIENT.to_array(),
        }
    }

    /// Ambient `#333333` plus a white point light at the sun
    /// (intensity 2, range 1000).
    pub fn solar(sun: DVec3) -> Self {
        let mut state = Self::new();
        state.add(PointLight::new(sun, Rgb::WHITE, 2.0, 1000.0));
        state
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Move the sun light. No-op when the rig has no lights.
    pub fn follow_sun(&mut self, sun: DVec3) {
        if let Some(light) = self.lights.first_mut() {
            *light = light.with_pos(sun);
        }
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
