//! Frame buffer layout shared with the host page.
//! Must stay in sync with the host's protocol reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Camera: 20 floats (view_proj 4x4, eye xyzw)]
//! [Bodies: max_bodies × 12 floats]
//! [Asteroids: max_asteroids × 4 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame.
//! The host reads them from the header to compute offsets dynamically.

use crate::api::simulation::{Simulation, SimulationConfig};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_ASTEROIDS: usize = 4;
pub const HEADER_ASTEROID_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_SIMULATION_TIME: usize = 8;
pub const HEADER_TIME_SPEED: usize = 9;
pub const HEADER_SELECTED: usize = 10;
pub const HEADER_VIEWPORT_WIDTH: usize = 11;
pub const HEADER_VIEWPORT_HEIGHT: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section.
pub const CAMERA_FLOATS: usize = 20;

/// Floats per body instance.
pub const BODY_FLOATS: usize = 12;

/// Floats per asteroid instance: x, y, z, shade.
pub const ASTEROID_FLOATS: usize = 4;

/// Floats per frame event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_asteroids: usize,
    pub max_events: usize,

    pub body_data_floats: usize,
    pub asteroid_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where the camera section begins.
    pub camera_offset: usize,
    pub body_data_offset: usize,
    pub asteroid_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize, max_asteroids: usize, max_events: usize) -> Self {
        let body_data_floats = max_bodies * BODY_FLOATS;
        let asteroid_data_floats = max_asteroids * ASTEROID_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_offset = HEADER_FLOATS;
        let body_data_offset = camera_offset + CAMERA_FLOATS;
        let asteroid_data_offset = body_data_offset + body_data_floats;
        let event_data_offset = asteroid_data_offset + asteroid_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_bodies,
            max_asteroids,
            max_events,
            body_data_floats,
            asteroid_data_floats,
            event_data_floats,
            camera_offset,
            body_data_offset,
            asteroid_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.max_bodies, config.max_asteroids, config.max_events)
    }

    /// A zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }
}

/// Write the current frame into `buf`. Sections are truncated to the layout's
/// capacities; the header carries the counts actually written.
pub fn pack_frame(layout: &ProtocolLayout, sim: &Simulation, buf: &mut [f32]) {
    if buf.len() < layout.buffer_total_floats {
        log::warn!(
            "frame buffer too small: {} < {} floats",
            buf.len(),
            layout.buffer_total_floats
        );
        return;
    }

    let instances = sim.instances();
    let bodies = write_section(
        buf,
        layout.body_data_offset,
        instances.bodies_as_floats(),
        layout.max_bodies,
        BODY_FLOATS,
    );
    let asteroids = write_section(
        buf,
        layout.asteroid_data_offset,
        instances.asteroids_as_floats(),
        layout.max_asteroids,
        ASTEROID_FLOATS,
    );
    let events = write_section(
        buf,
        layout.event_data_offset,
        bytemuck::cast_slice(sim.events()),
        layout.max_events,
        EVENT_FLOATS,
    );

    let uniform = sim.controller().camera().uniform();
    let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));
    buf[layout.camera_offset..layout.camera_offset + CAMERA_FLOATS].copy_from_slice(camera);

    let (width, height) = sim.viewport();
    let header = &mut buf[..HEADER_FLOATS];
    header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    header[HEADER_FRAME_COUNTER] = sim.frame_counter() as f32;
    header[HEADER_MAX_BODIES] = layout.max_bodies as f32;
    header[HEADER_BODY_COUNT] = bodies as f32;
    header[HEADER_MAX_ASTEROIDS] = layout.max_asteroids as f32;
    header[HEADER_ASTEROID_COUNT] = asteroids as f32;
    header[HEADER_MAX_EVENTS] = layout.max_events as f32;
    header[HEADER_EVENT_COUNT] = events as f32;
    header[HEADER_SIMULATION_TIME] = sim.simulation_time() as f32;
    header[HEADER_TIME_SPEED] = sim.time_speed() as f32;
    header[HEADER_SELECTED] = sim.selected().map_or(-1.0, |id| id.0 as f32);
    header[HEADER_VIEWPORT_WIDTH] = width;
    header[HEADER_VIEWPORT_HEIGHT] = height;
}

/// Copy up to `max` records of `stride` floats; returns the record count written.
fn write_section(buf: &mut [f32], offset: usize, data: &[f32], max: usize, stride: usize) -> usize {
    let count = (data.len() / stride).min(max);
    let len = count * stride;
    buf[offset..offset + len].copy_from_slice(&data[..len]);
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(64, 2048, 32);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.body_data_offset, HEADER_FLOATS + CAMERA_FLOATS);
        assert_eq!(layout.asteroid_data_offset, layout.body_data_offset + 64 * 12);
        assert_eq!(layout.event_data_offset, layout.asteroid_data_offset + 2048 * 4);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn default_config_fits_the_builtin_scene() {
        let layout = ProtocolLayout::from_config(&SimulationConfig::default());
        assert!(layout.max_bodies >= 32);
        assert!(layout.max_asteroids >= 2000);
        assert_eq!(layout.allocate().len(), layout.buffer_total_floats);
    }

    #[test]
    fn pack_frame_fills_header_and_sections() {
        use crate::catalog::Catalog;
        use crate::core::belt::BeltConfig;
        use crate::input::queue::InputQueue;

        let config = SimulationConfig {
            belt: BeltConfig { count: 10, ..BeltConfig::default() },
            ..SimulationConfig::default()
        };
        let mut sim = Simulation::new(Catalog::solar_system().unwrap(), config).unwrap();
        sim.frame(&InputQueue::new());

        let layout = ProtocolLayout::new(4, 8, 32);
        let mut buf = layout.allocate();
        pack_frame(&layout, &sim, &mut buf);

        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(buf[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(buf[HEADER_BODY_COUNT], 4.0);
        assert_eq!(buf[HEADER_ASTEROID_COUNT], 8.0);
        assert_eq!(buf[HEADER_EVENT_COUNT], 2.0);
        assert_eq!(buf[HEADER_SIMULATION_TIME], 1.0);
        assert_eq!(buf[HEADER_SELECTED], -1.0);

        // First body record is the sun at the origin with radius 8.
        let sun = &buf[layout.body_data_offset..layout.body_data_offset + BODY_FLOATS];
        assert_eq!(&sun[..4], &[0.0, 0.0, 0.0, 8.0]);
        // Eye position sits in the last four camera floats.
        assert_eq!(buf[layout.camera_offset + CAMERA_FLOATS - 1], 1.0);
    }

    #[test]
    fn pack_frame_skips_short_buffers() {
        use crate::catalog::Catalog;
        let sim = Simulation::new(Catalog::solar_system().unwrap(), SimulationConfig::default()).unwrap();
        let layout = ProtocolLayout::from_config(sim.config());
        let mut buf = vec![0.0; 4];
        pack_frame(&layout, &sim, &mut buf);
        assert_eq!(buf, vec![0.0; 4]);
    }

    #[test]
    fn wire_sizes_match_structs() {
        use crate::api::types::FrameEvent;
        use crate::renderer::camera::CameraUniform;
        use crate::renderer::instance::{AsteroidInstance, BodyInstance};
        assert_eq!(BODY_FLOATS, BodyInstance::FLOATS);
        assert_eq!(ASTEROID_FLOATS, AsteroidInstance::FLOATS);
        assert_eq!(EVENT_FLOATS, FrameEvent::FLOATS);
        assert_eq!(CAMERA_FLOATS, CameraUniform::FLOATS);
    }
}
