//! Procedural surface textures.
//!
//! Generators paint into a square RGBA8 `PixelBuffer` that the host uploads
//! with wrap-repeat sampling. All randomness is seeded.

pub mod procedural;

pub use procedural::{gas_giant_texture, planet_texture, GAS_GIANT_SIZE, PLANET_SIZE};

use crate::api::types::Rgb;
use crate::error::TextureError;

/// Square RGBA8 image, row-major, origin top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    size: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Opaque black image. `size` must be a non-zero power of two.
    pub fn new(size: u32) -> Result<Self, TextureError> {
        if !size.is_power_of_two() {
            return Err(TextureError::InvalidSize(size));
        }
        let mut data = vec![0; (size * size * 4) as usize];
        for alpha in data.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn fill(&mut self, color: Rgb) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
    }

    /// Pixel at (x, y), wrapping both axes like a repeat-addressed sampler.
    pub fn pixel(&self, x: i64, y: i64) -> Rgb {
        let i = self.index(x, y);
        Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Source-over blend of `color` at `alpha` onto (x, y), wrapping both axes.
    /// Alpha is clamped to [0, 1].
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let i = self.index(x, y);
        for (channel, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = self.data[i + channel] as f32;
            let out = dst * (1.0 - alpha) + src as f32 * alpha;
            self.data[i + channel] = out.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Blend a horizontal strip of rows `[y0, y1)` across the full width.
    pub fn blend_rows(&mut self, y0: u32, y1: u32, color: Rgb, alpha: f32) {
        for y in y0..y1.min(self.size) {
            for x in 0..self.size {
                self.blend(x as i64, y as i64, color, alpha);
            }
        }
    }

    /// Blend a filled disc centered at (cx, cy). Pixels past an edge wrap
    /// to the opposite side so the image stays tileable.
    pub fn blend_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    fn index(&self, x: i64, y: i64) -> usize {
        let size = self.size as i64;
        let x = x.rem_euclid(size);
        let y = y.rem_euclid(size);
        ((y * size + x) * 4) as usize
    }
}
