use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::api::types::Rgb;
use crate::error::TextureError;
use crate::texture::PixelBuffer;

pub const PLANET_SIZE: u32 = 128;
pub const GAS_GIANT_SIZE: u32 = 256;

const BAND_COUNT: u32 = 12;
const BAND_ALPHA: f32 = 0.1;
const STORM_COUNT: usize = 50;
const STORM_ALPHA: f32 = 0.05;
const SPECKLE_AMPLITUDE: f32 = 0.05;

fn parse_base(base_hex: &str) -> Result<Rgb, TextureError> {
    Rgb::from_hex(base_hex).ok_or_else(|| TextureError::InvalidColor(base_hex.to_string()))
}

/// Speckled rocky surface.
///
/// Base fill, then `detail` passes over every pixel. Each pixel is touched
/// with probability `1 - roughness` and darkened by a random alpha drawn from
/// `[-0.05, 0.05)`; negative draws leave it unchanged.
pub fn planet_texture(
    detail: u32,
    roughness: f32,
    base_hex: &str,
    seed: u64,
) -> Result<PixelBuffer, TextureError> {
    if detail == 0 {
        return Err(TextureError::InvalidDetail);
    }
    let base = parse_base(base_hex)?;
    let roughness = if roughness.is_finite() { roughness.clamp(0.0, 1.0) } else { 1.0 };

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut buf = PixelBuffer::new(PLANET_SIZE)?;
    buf.fill(base);

    let black = Rgb::new(0, 0, 0);
    for _ in 0..detail {
        for x in 0..PLANET_SIZE as i64 {
            for y in 0..PLANET_SIZE as i64 {
                if rng.random::<f32>() > roughness {
                    let shade = rng.random::<f32>() * (2.0 * SPECKLE_AMPLITUDE) - SPECKLE_AMPLITUDE;
                    buf.blend(x, y, black, shade);
                }
            }
        }
    }
    Ok(buf)
}

/// Banded gas-giant surface: 12 alternating light/dark bands, then 50 soft
/// white storms that wrap across the edges.
pub fn gas_giant_texture(base_hex: &str, seed: u64) -> Result<PixelBuffer, TextureError> {
    let base = parse_base(base_hex)?;
    let mut buf = PixelBuffer::new(GAS_GIANT_SIZE)?;
    buf.fill(base);
    paint_bands(&mut buf, BAND_COUNT);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let size = GAS_GIANT_SIZE as f32;
    for _ in 0..STORM_COUNT {
        let x = rng.random::<f32>() * size;
        let y = rng.random::<f32>() * size;
        let radius = rng.random::<f32>() * 20.0 + 10.0;
        buf.blend_disc(x, y, radius, Rgb::WHITE, STORM_ALPHA);
    }
    Ok(buf)
}

/// Even bands lighten, odd bands darken.
fn paint_bands(buf: &mut PixelBuffer, bands: u32) {
    let size = buf.size();
    for band in 0..bands {
        let y0 = band * size / bands;
        let y1 = (band + 1) * size / bands;
        let overlay = if band % 2 == 0 { Rgb::WHITE } else { Rgb::new(0, 0, 0) };
        buf.blend_rows(y0, y1, overlay, BAND_ALPHA);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luminance(c: Rgb) -> u32 {
        c.r as u32 + c.g as u32 + c.b as u32
    }

    #[test]
    fn planet_is_128_square_and_seeded() {
        let a = planet_texture(4, 0.7, "#8c8c8c", 1).unwrap();
        let b = planet_texture(4, 0.7, "#8c8c8c", 1).unwrap();
        let c = planet_texture(4, 0.7, "#8c8c8c", 2).unwrap();
        assert_eq!(a.size(), 128);
        assert_eq!(a.as_bytes().len(), 128 * 128 * 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn planet_speckles_only_darken() {
        let base = Rgb::from_u32(0xc1440e);
        let tex = planet_texture(4, 0.5, "#c1440e", 9).unwrap();
        let mut darker = 0;
        for y in 0..128 {
            for x in 0..128 {
                let p = tex.pixel(x, y);
                assert!(p.r <= base.r && p.g <= base.g && p.b <= base.b);
                if p != base {
                    darker += 1;
                }
            }
        }
        assert!(darker > 0);
    }

    #[test]
    fn full_roughness_leaves_base_color() {
        let tex = planet_texture(3, 1.0, "#ffd700", 5).unwrap();
        let base = Rgb::from_u32(0xffd700);
        assert!((0..128).all(|y| (0..128).all(|x| tex.pixel(x, y) == base)));
    }

    #[test]
    fn planet_rejects_bad_input() {
        assert_eq!(planet_texture(0, 0.5, "#ffffff", 0).unwrap_err(), TextureError::InvalidDetail);
        assert_eq!(
            planet_texture(1, 0.5, "blue", 0).unwrap_err(),
            TextureError::InvalidColor("blue".into())
        );
    }

    #[test]
    fn bands_alternate_light_and_dark() {
        let base = Rgb::new(128, 128, 128);
        let mut buf = PixelBuffer::new(GAS_GIANT_SIZE).unwrap();
        buf.fill(base);
        paint_bands(&mut buf, BAND_COUNT);

        let band_height = GAS_GIANT_SIZE / BAND_COUNT;
        for band in 0..BAND_COUNT {
            let y = (band * GAS_GIANT_SIZE / BAND_COUNT + band_height / 2) as i64;
            let lum = luminance(buf.pixel(0, y));
            if band % 2 == 0 {
                assert!(lum > luminance(base), "band {band} should be lighter");
            } else {
                assert!(lum < luminance(base), "band {band} should be darker");
            }
        }
    }

    #[test]
    fn gas_giant_is_256_square_and_seeded() {
        let a = gas_giant_texture("#c99039", 3).unwrap();
        let b = gas_giant_texture("#c99039", 3).unwrap();
        assert_eq!(a.size(), 256);
        assert_eq!(a, b);
        assert_ne!(a, gas_giant_texture("#c99039", 4).unwrap());
    }
}
