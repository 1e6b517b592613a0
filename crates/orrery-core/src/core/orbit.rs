use glam::DVec3;

use crate::api::types::BodyId;
use crate::catalog::Catalog;

/// Per-body rotation about its own axis added on every `advance`.
pub const DEFAULT_SPIN_STEP: f64 = 0.01;

/// Derived, mutable orbital state: simulation time plus every body's world
/// position and spin angle, indexed by `BodyId`.
///
/// Positions are recomputed from `simulation_time` on every advance and never
/// integrated, so they cannot drift. Orbits are assumed to have `period > 0`;
/// `Catalog` guarantees that at load.
#[derive(Debug, Clone)]
pub struct OrbitalState {
    simulation_time: f64,
    world: Vec<DVec3>,
    spin: Vec<f64>,
    spin_step: f64,
}

impl OrbitalState {
    /// Create state for `catalog` at simulation time zero, positions already placed.
    pub fn new(catalog: &Catalog) -> Self {
        let mut state = Self {
            simulation_time: 0.0,
            world: vec![DVec3::ZERO; catalog.len()],
            spin: vec![0.0; catalog.len()],
            spin_step: DEFAULT_SPIN_STEP,
        };
        state.recompute(catalog);
        state
    }

    pub fn with_spin_step(mut self, spin_step: f64) -> Self {
        self.spin_step = spin_step;
        self
    }

    /// Add `time_speed` to the simulation time, recompute every position and
    /// grow every spin accumulator by one step. Negative speeds run orbits
    /// backward; spin always advances.
    pub fn advance(&mut self, catalog: &Catalog, time_speed: f64) {
        self.simulation_time += time_speed;
        self.recompute(catalog);
        for spin in &mut self.spin {
            *spin += self.spin_step;
        }
    }

    /// Jump to an absolute simulation time. Spin is left untouched.
    #[cfg(test)]
    pub fn set_time(&mut self, catalog: &Catalog, simulation_time: f64) {
        self.simulation_time = simulation_time;
        self.recompute(catalog);
    }

    fn recompute(&mut self, catalog: &Catalog) {
        if catalog.is_empty() {
            return;
        }
        if self.world.len() != catalog.len() {
            self.world.resize(catalog.len(), DVec3::ZERO);
            self.spin.resize(catalog.len(), 0.0);
        }
        self.place(catalog, BodyId::ROOT, DVec3::ZERO);
    }

    /// world = parent world + own orbital offset, applied top-down.
    fn place(&mut self, catalog: &Catalog, id: BodyId, parent_world: DVec3) {
        let Some(node) = catalog.get(id) else {
            return;
        };
        let local = node
            .orbit
            .map(|orbit| orbit.local_position(self.simulation_time))
            .unwrap_or(DVec3::ZERO);
        let world = parent_world + local;
        self.world[id.index()] = world;

        for &child in &node.children {
            self.place(catalog, child, world);
        }
    }

    pub fn simulation_time(&self) -> f64 {
        self.simulation_time
    }

    pub fn world_position(&self, id: BodyId) -> Option<DVec3> {
        self.world.get(id.index()).copied()
    }

    pub fn spin(&self, id: BodyId) -> Option<f64> {
        self.spin.get(id.index()).copied()
    }

    /// World positions in catalog order.
    pub fn positions(&self) -> &[DVec3] {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CelestialBody, CircularOrbit};
    use std::f64::consts::TAU;

    const EPS: f64 = 1e-9;

    fn single(distance: f64, period: f64) -> Catalog {
        Catalog::from_tree(
            CelestialBody::star("Sun", 8.0)
                .with_moon(CelestialBody::orbiting("Body", 1.0, distance, period)),
        )
        .unwrap()
    }

    fn planet_with_moon(planet: (f64, f64), moon: (f64, f64)) -> Catalog {
        Catalog::from_tree(
            CelestialBody::star("Sun", 8.0).with_moon(
                CelestialBody::orbiting("Planet", 1.0, planet.0, planet.1)
                    .with_moon(CelestialBody::orbiting("Moon", 0.2, moon.0, moon.1)),
            ),
        )
        .unwrap()
    }

    #[test]
    fn sun_stays_at_origin() {
        let catalog = single(20.0, 365.0);
        let mut state = OrbitalState::new(&catalog);
        state.advance(&catalog, 123.4);
        assert_eq!(state.world_position(BodyId::ROOT), Some(DVec3::ZERO));
    }

    #[test]
    fn full_period_returns_to_start() {
        let catalog = single(20.0, 365.0);
        let mut state = OrbitalState::new(&catalog);
        let start = state.world_position(BodyId(1)).unwrap();
        for _ in 0..365 {
            state.advance(&catalog, 1.0);
        }
        assert!((state.simulation_time() - 365.0).abs() < EPS);
        let end = state.world_position(BodyId(1)).unwrap();
        assert!((end - start).length() < 1e-6, "drifted to {end:?}");
    }

    #[test]
    fn forward_then_backward_round_trips() {
        let catalog = planet_with_moon((20.0, 365.0), (2.5, 27.3));
        let mut state = OrbitalState::new(&catalog);
        state.advance(&catalog, 17.0);
        let before: Vec<DVec3> = state.positions().to_vec();

        state.advance(&catalog, 250.0);
        state.advance(&catalog, -250.0);
        for (a, b) in before.iter().zip(state.positions()) {
            assert!((*a - *b).length() < 1e-9);
        }
    }

    #[test]
    fn negative_speed_runs_backward() {
        let catalog = single(10.0, 100.0);
        let mut state = OrbitalState::new(&catalog);
        state.advance(&catalog, -25.0);
        let p = state.world_position(BodyId(1)).unwrap();
        assert!(p.x.abs() < EPS);
        assert!((p.z + 10.0).abs() < EPS, "z = {}", p.z);
    }

    #[test]
    fn moon_orbits_parent_at_origin() {
        // Planet at distance 0 sits on the sun: the moon traces only its own circle.
        let catalog = planet_with_moon((0.0, 1000.0), (3.0, 10.0));
        let mut state = OrbitalState::new(&catalog);
        state.set_time(&catalog, 2.5);
        let moon = state.world_position(BodyId(2)).unwrap();
        let theta = (2.5 / 10.0) * TAU;
        let expected = DVec3::new(theta.cos() * 3.0, 0.0, theta.sin() * 3.0);
        assert!((moon - expected).length() < EPS);
    }

    #[test]
    fn moon_follows_orbiting_parent() {
        let catalog = planet_with_moon((20.0, 365.0), (2.5, 27.3));
        let mut state = OrbitalState::new(&catalog);
        let moon_orbit = CircularOrbit::new(2.5, 27.3);

        for step in [1.0, 30.0, 91.25, 200.0] {
            state.advance(&catalog, step);
            let t = state.simulation_time();
            let planet = state.world_position(BodyId(1)).unwrap();
            let moon = state.world_position(BodyId(2)).unwrap();

            assert!((moon - (planet + moon_orbit.local_position(t))).length() < EPS);
            // Distance from the parent is constant; distance from the origin is not.
            assert!(((moon - planet).length() - 2.5).abs() < EPS);
        }

        let t = state.simulation_time();
        let own_circle_only = moon_orbit.local_position(t);
        let moon = state.world_position(BodyId(2)).unwrap();
        assert!((moon - own_circle_only).length() > 1.0);
    }

    #[test]
    fn spin_grows_per_advance_regardless_of_speed() {
        let catalog = single(20.0, 365.0);
        let mut state = OrbitalState::new(&catalog).with_spin_step(0.01);
        state.advance(&catalog, 5.0);
        state.advance(&catalog, 0.0);
        state.advance(&catalog, -5.0);
        let spin = state.spin(BodyId(1)).unwrap();
        assert!((spin - 0.03).abs() < EPS);
        assert!((state.spin(BodyId::ROOT).unwrap() - 0.03).abs() < EPS);
    }

    #[test]
    fn unknown_id_returns_none() {
        let catalog = single(20.0, 365.0);
        let state = OrbitalState::new(&catalog);
        assert!(state.world_position(BodyId(99)).is_none());
    }
}
