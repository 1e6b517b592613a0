use std::error::Error;

use orrery_core::{
    pack_frame, BodyId, Catalog, InputEvent, InputQueue, ProtocolLayout, Simulation,
    SimulationConfig,
};

/// Owns one simulation, its input queue and the packed frame buffer.
///
/// Each page creates a `thread_local!` SimulationRunner through
/// `export_orrery!`, because wasm-bindgen cannot export stateful free
/// functions without a home for the state.
pub struct SimulationRunner {
    sim: Simulation,
    input: InputQueue,
    layout: ProtocolLayout,
    frame: Vec<f32>,
}

impl SimulationRunner {
    pub fn new(catalog: Catalog, config: SimulationConfig) -> Result<Self, Box<dyn Error>> {
        let layout = ProtocolLayout::from_config(&config);
        let sim = Simulation::new(catalog, config)?;
        let mut runner = Self {
            sim,
            input: InputQueue::new(),
            frame: layout.allocate(),
            layout,
        };
        pack_frame(&runner.layout, &runner.sim, &mut runner.frame);
        Ok(runner)
    }

    /// Build from JSON documents. A missing config uses the defaults.
    pub fn from_json(catalog_json: &str, config_json: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let catalog = Catalog::from_json(catalog_json)?;
        let config = match config_json {
            Some(json) => SimulationConfig::from_json(json)?,
            None => SimulationConfig::default(),
        };
        Self::new(catalog, config)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame and repack the frame buffer.
    pub fn tick(&mut self) {
        self.sim.frame(&self.input);
        self.input.drain();
        pack_frame(&self.layout, &self.sim, &mut self.frame);
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn take_info(&mut self) -> Option<String> {
        self.sim.take_info()
    }

    /// Flattened world-space orbit polyline `[x, y, z, ...]`; empty for the sun
    /// or an unknown id.
    pub fn orbit_path(&self, id: u32) -> Vec<f32> {
        self.sim
            .orbit_path(BodyId(id))
            .unwrap_or_default()
            .into_iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    // ---- Pointer accessors for frame buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_asteroids(&self) -> u32 {
        self.layout.max_asteroids as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_SIMULATION_TIME};
    use orrery_core::catalog::SOLAR_SYSTEM_JSON;

    #[test]
    fn tick_drains_input_and_repacks() {
        let mut runner = SimulationRunner::from_json(SOLAR_SYSTEM_JSON, None).unwrap();
        runner.push_input(InputEvent::SetTimeSpeed { speed: 5.0 });
        runner.tick();
        runner.tick();
        assert_eq!(runner.frame()[HEADER_FRAME_COUNTER], 2.0);
        assert_eq!(runner.frame()[HEADER_SIMULATION_TIME], 10.0);
        assert_eq!(runner.frame().len(), runner.buffer_total_floats() as usize);
    }

    #[test]
    fn bad_catalog_fails_with_message() {
        let err = SimulationRunner::from_json("{}", None).err().unwrap();
        assert!(err.to_string().contains("catalog"));
    }

    #[test]
    fn bad_config_fails_with_message() {
        let err = SimulationRunner::from_json(SOLAR_SYSTEM_JSON, Some(r#"{ "max_bodies": 0 }"#))
            .err()
            .unwrap();
        assert!(err.to_string().contains("max_bodies"));
    }

    #[test]
    fn orbit_path_is_flat_xyz() {
        let runner = SimulationRunner::from_json(SOLAR_SYSTEM_JSON, None).unwrap();
        assert_eq!(runner.orbit_path(1).len(), 129 * 3);
        assert!(runner.orbit_path(0).is_empty());
        assert!(runner.orbit_path(9999).is_empty());
    }
}
