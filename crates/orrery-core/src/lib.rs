pub mod api;
pub mod bridge;
pub mod catalog;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod texture;

// Re-export key types at crate root for convenience
pub use api::simulation::{Simulation, SimulationConfig};
pub use api::types::{BodyId, FrameEvent, Rgb};
pub use catalog::{BodyNode, Catalog, Category, CelestialBody, CircularOrbit, ObjectGroup, Rings, Surface};
pub use core::belt::{Asteroid, AsteroidBelt, BeltConfig};
pub use core::camera_controller::{CameraConfig, CameraController, Spherical, SphericalDelta};
pub use core::orbit::OrbitalState;
pub use error::{CatalogError, ConfigError, TextureError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::instance::{AsteroidInstance, BodyInstance, InstanceBuffer};
pub use renderer::picking::{PickHit, PickTarget, Ray};
pub use bridge::protocol::{pack_frame, ProtocolLayout};
pub use systems::lighting::{LightState, PointLight};
pub use texture::{gas_giant_texture, planet_texture, PixelBuffer};
