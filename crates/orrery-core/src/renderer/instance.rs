use bytemuck::{Pod, Zeroable};

/// Per-body render data written to the frame buffer for the host renderer.
/// Must match the host protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius in world units.
    pub radius: f32,
    /// Rotation about the body's own Y axis, in radians.
    pub spin: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// 1.0 for the emissive sun, 0.0 for lit bodies.
    pub emissive: f32,
    /// 0 = rocky, 1 = gas giant.
    pub surface: f32,
    /// 1.0 when the body carries a ring system.
    pub rings: f32,
    pub body_id: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-asteroid render data: position and grey level. 4 floats = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct AsteroidInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub shade: f32,
}

impl AsteroidInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Instances for one frame, rebuilt every tick.
pub struct InstanceBuffer {
    pub bodies: Vec<BodyInstance>,
    pub asteroids: Vec<AsteroidInstance>,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 2048)
    }

    pub fn with_capacity(bodies: usize, asteroids: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(bodies),
            asteroids: Vec::with_capacity(asteroids),
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.asteroids.clear();
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn asteroid_count(&self) -> u32 {
        self.asteroids.len() as u32
    }

    pub fn bodies_as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.bodies)
    }

    pub fn asteroids_as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.asteroids)
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
