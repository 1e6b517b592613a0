use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Index of a body in the catalog arena. `BodyId(0)` is always the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BodyId(pub u32);

impl BodyId {
    pub const ROOT: BodyId = BodyId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// 8-bit sRGB color parsed from `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional). Returns None on any other shape.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        Some(Self::from_u32(value))
    }

    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear 0..1 channels for GPU upload.
    pub fn to_array(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// A frame event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl FrameEvent {
    pub const FLOATS: usize = 4;

    /// `a` = simulation time, `b` = time speed.
    pub const TIME_INFO: f32 = 1.0;
    /// `a` = selected body id, or -1 when nothing is selected.
    pub const SELECTION: f32 = 2.0;
    /// `a` = body id whose info was just published to the info sink.
    pub const INFO: f32 = 3.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#8c8c8c"), Some(Rgb::new(0x8c, 0x8c, 0x8c)));
        assert_eq!(Rgb::from_hex("ffd700"), Some(Rgb::new(0xff, 0xd7, 0x00)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
        assert_eq!(Rgb::from_hex(""), None);
    }

    #[test]
    fn hex_formatting_round_trips() {
        let c = Rgb::from_u32(0x4169e1);
        assert_eq!(c.to_hex(), "#4169e1");
    }

    #[test]
    fn frame_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<FrameEvent>(), FrameEvent::FLOATS * 4);
    }
}
