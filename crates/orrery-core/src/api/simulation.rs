use glam::DVec3;
use serde::Deserialize;

use crate::api::types::{BodyId, FrameEvent};
use crate::catalog::{Catalog, ObjectGroup};
use crate::core::belt::{AsteroidBelt, BeltConfig};
use crate::core::camera_controller::{CameraConfig, CameraController};
use crate::core::orbit::{OrbitalState, DEFAULT_SPIN_STEP};
use crate::error::ConfigError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::InstanceBuffer;
use crate::renderer::picking::{self, PickHit};
use crate::systems::lighting::LightState;
use crate::systems::render::build_instance_buffer;

/// Simulation configuration. Every field has a default, so a partial JSON
/// override only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub camera: CameraConfig,
    pub belt: BeltConfig,
    /// Spin added to every body per frame, in radians.
    pub spin_step: f64,
    /// Time speed is clamped to `[-max_time_speed, max_time_speed]`.
    pub max_time_speed: f64,
    pub initial_time_speed: f64,
    /// Maximum body instances in the frame buffer (default: 64).
    pub max_bodies: usize,
    /// Maximum asteroid instances in the frame buffer (default: 2048).
    pub max_asteroids: usize,
    /// Maximum frame events per frame (default: 32).
    pub max_events: usize,
    /// Segments per orbit polyline.
    pub orbit_segments: usize,
    /// How far (world units) from an orbit circle a click still selects it.
    pub orbit_pick_threshold: f64,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            belt: BeltConfig::default(),
            spin_step: DEFAULT_SPIN_STEP,
            max_time_speed: 100.0,
            initial_time_speed: 1.0,
            max_bodies: 64,
            max_asteroids: 2048,
            max_events: 32,
            orbit_segments: 128,
            orbit_pick_threshold: 1.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a (partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        if !(self.max_time_speed.is_finite() && self.max_time_speed >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "max_time_speed",
                reason: format!("must be finite and non-negative, got {}", self.max_time_speed),
            });
        }
        if !self.initial_time_speed.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "initial_time_speed",
                reason: "must be finite".into(),
            });
        }
        if !self.spin_step.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "spin_step",
                reason: "must be finite".into(),
            });
        }
        if !(self.belt.inner_radius > 0.0
            && self.belt.inner_radius <= self.belt.outer_radius
            && self.belt.outer_radius.is_finite())
        {
            return Err(ConfigError::InvalidValue {
                field: "belt.inner_radius",
                reason: format!(
                    "need 0 < inner_radius <= outer_radius, got {}..{}",
                    self.belt.inner_radius, self.belt.outer_radius
                ),
            });
        }
        if !(self.belt.thickness.is_finite() && self.belt.thickness >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "belt.thickness",
                reason: format!("must be finite and non-negative, got {}", self.belt.thickness),
            });
        }
        if !self.belt.speed_factor.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "belt.speed_factor",
                reason: "must be finite".into(),
            });
        }
        if self.max_bodies == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_bodies",
                reason: "must be at least 1".into(),
            });
        }
        // Time info and selection are written every frame.
        if self.max_events < 2 {
            return Err(ConfigError::InvalidValue {
                field: "max_events",
                reason: format!("must be at least 2, got {}", self.max_events),
            });
        }
        if !(self.orbit_pick_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "orbit_pick_threshold",
                reason: format!("must be non-negative, got {}", self.orbit_pick_threshold),
            });
        }
        Ok(())
    }
}

/// Owning context for one orrery: catalog, orbital state, belt, camera,
/// lights and the per-frame outputs. All operations run on the caller's thread.
pub struct Simulation {
    config: SimulationConfig,
    catalog: Catalog,
    orbits: OrbitalState,
    belt: AsteroidBelt,
    controller: CameraController,
    lights: LightState,
    instances: InstanceBuffer,
    time_speed: f64,
    viewport: (f32, f32),
    selected: Option<BodyId>,
    info: Option<String>,
    events: Vec<FrameEvent>,
    frame_counter: u64,
}

impl Simulation {
    pub fn new(catalog: Catalog, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let aspect = if config.viewport_height > 0.0 {
            config.viewport_width / config.viewport_height
        } else {
            1.0
        };
        let orbits = OrbitalState::new(&catalog).with_spin_step(config.spin_step);
        let belt = AsteroidBelt::generate(&config.belt);
        let controller = CameraController::new(config.camera.clone(), aspect);
        let sun = orbits.world_position(BodyId::ROOT).unwrap_or(DVec3::ZERO);
        let lights = LightState::solar(sun);
        let instances = InstanceBuffer::with_capacity(config.max_bodies, config.max_asteroids);

        log::info!(
            "simulation: {} bodies, {} asteroids, time speed {}",
            catalog.len(),
            belt.len(),
            config.initial_time_speed
        );

        let mut sim = Self {
            time_speed: 0.0,
            viewport: (config.viewport_width, config.viewport_height),
            catalog,
            orbits,
            belt,
            controller,
            lights,
            instances,
            selected: None,
            info: None,
            events: Vec::with_capacity(config.max_events),
            frame_counter: 0,
            config,
        };
        sim.set_time_speed(sim.config.initial_time_speed);
        sim.rebuild_instances();
        Ok(sim)
    }

    /// One animation frame: apply queued input in order, then camera update,
    /// orbital advance, lighting and instance rebuild. The caller drains the
    /// queue afterwards.
    pub fn frame(&mut self, input: &InputQueue) {
        self.events.clear();

        for event in input.iter() {
            self.handle(event);
        }

        self.controller.update();
        self.orbits.advance(&self.catalog, self.time_speed);
        if let Some(sun) = self.orbits.world_position(BodyId::ROOT) {
            self.lights.follow_sun(sun);
        }
        self.rebuild_instances();

        self.emit(FrameEvent {
            kind: FrameEvent::TIME_INFO,
            a: self.orbits.simulation_time() as f32,
            b: self.time_speed as f32,
            c: 0.0,
        });
        self.emit(FrameEvent {
            kind: FrameEvent::SELECTION,
            a: self.selected.map_or(-1.0, |id| id.0 as f32),
            b: 0.0,
            c: 0.0,
        });
        self.frame_counter += 1;
    }

    fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown { button, x, y } => {
                self.controller.on_pointer_down(*button, *x as f64, *y as f64)
            }
            InputEvent::PointerMove { x, y } => self.controller.on_pointer_move(*x as f64, *y as f64),
            InputEvent::PointerUp { .. } => self.controller.on_pointer_up(),
            InputEvent::Scroll { delta_y } => self.controller.on_scroll(*delta_y as f64),
            InputEvent::Click { x, y } => {
                self.click(*x, *y);
            }
            InputEvent::Resize { width, height } => self.resize(*width, *height),
            InputEvent::SetTimeSpeed { speed } => self.set_time_speed(*speed),
            InputEvent::SelectObject { name } => self.select_object(name),
        }
    }

    fn rebuild_instances(&mut self) {
        build_instance_buffer(
            &self.catalog,
            &self.orbits,
            &self.belt,
            self.config.max_bodies,
            self.config.max_asteroids,
            &mut self.instances,
        );
    }

    fn emit(&mut self, event: FrameEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        }
    }

    // ── Controls ──

    /// Non-finite speeds are ignored; finite ones are clamped.
    pub fn set_time_speed(&mut self, speed: f64) {
        if !speed.is_finite() {
            log::warn!("ignoring non-finite time speed {speed}");
            return;
        }
        let max = self.config.max_time_speed;
        self.time_speed = speed.clamp(-max, max);
    }

    /// Focus the camera on a body by name. The root resets the camera;
    /// an empty name does nothing; unknown names are logged and ignored.
    pub fn select_object(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let Some(node) = self.catalog.find_by_name(name) else {
            log::warn!("select_object: no body named `{name}`");
            return;
        };
        let id = node.id;
        if id == BodyId::ROOT {
            self.controller.reset();
        } else if let Some(pos) = self.orbits.world_position(id) {
            self.controller.focus_on_object(pos);
        }
        log::debug!("selected {name}");
        self.selected = Some(id);
    }

    /// Pick at viewport pixel (x, y). Bodies first, then orbit paths. A hit
    /// publishes that body's info; a miss leaves the info sink untouched.
    pub fn click(&mut self, x: f32, y: f32) -> Option<PickHit> {
        let (width, height) = self.viewport;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        let ndc = Camera3D::screen_to_ndc(x, y, width, height);
        let ray = self.controller.camera().ray_from_ndc(ndc);
        let hit = picking::pick(&ray, &self.catalog, &self.orbits, self.config.orbit_pick_threshold)?;

        if let Some(node) = self.catalog.get(hit.body) {
            self.info = Some(node.info.clone());
            self.emit(FrameEvent {
                kind: FrameEvent::INFO,
                a: hit.body.0 as f32,
                b: 0.0,
                c: 0.0,
            });
        }
        Some(hit)
    }

    /// Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = (width, height);
        self.controller.resize(width, height);
    }

    /// Info published by the last successful pick, once.
    pub fn take_info(&mut self) -> Option<String> {
        self.info.take()
    }

    // ── Queries ──

    /// World-space orbit polyline of a body, following its parent's current position.
    pub fn orbit_path(&self, id: BodyId) -> Option<Vec<DVec3>> {
        let node = self.catalog.get(id)?;
        let orbit = node.orbit?;
        let center = self.orbits.world_position(node.parent?)?;
        Some(
            orbit
                .path(self.config.orbit_segments)
                .into_iter()
                .map(|p| center + p)
                .collect(),
        )
    }

    pub fn object_groups(&self) -> Vec<ObjectGroup> {
        self.catalog.groups()
    }

    pub fn object_groups_json(&self) -> String {
        serde_json::to_string(&self.object_groups()).unwrap_or_default()
    }

    pub fn bodies_json(&self) -> String {
        serde_json::to_string(&self.catalog.iter().collect::<Vec<_>>()).unwrap_or_default()
    }

    pub fn world_position(&self, id: BodyId) -> Option<DVec3> {
        self.orbits.world_position(id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn orbits(&self) -> &OrbitalState {
        &self.orbits
    }

    pub fn belt(&self) -> &AsteroidBelt {
        &self.belt
    }

    pub fn controller(&self) -> &CameraController {
        &self.controller
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    pub fn events(&self) -> &[FrameEvent] {
        &self.events
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn time_speed(&self) -> f64 {
        self.time_speed
    }

    pub fn simulation_time(&self) -> f64 {
        self.orbits.simulation_time()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }
}
