//! Asteroid belt: a seeded ring of small bodies on circular orbits around the sun.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;

/// Belt generation parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    pub count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Total vertical spread, centered on the orbital plane.
    pub thickness: f64,
    /// Angular speed numerator: `speed = speed_factor / radius` per time unit.
    pub speed_factor: f64,
    pub seed: u64,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            count: 2000,
            inner_radius: 35.0,
            outer_radius: 45.0,
            thickness: 2.0,
            speed_factor: 0.5,
            seed: 0x5EED_BE17,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    pub radius: f64,
    pub initial_angle: f64,
    pub height: f64,
    /// Radians per time unit.
    pub angular_speed: f64,
    /// Grey level in [0.5, 1).
    pub shade: f32,
}

impl Asteroid {
    pub fn angle(&self, t: f64) -> f64 {
        self.initial_angle + self.angular_speed * t
    }

    pub fn position(&self, t: f64) -> DVec3 {
        let angle = self.angle(t);
        DVec3::new(angle.cos() * self.radius, self.height, angle.sin() * self.radius)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AsteroidBelt {
    asteroids: Vec<Asteroid>,
}

impl AsteroidBelt {
    /// Generate the belt. Deterministic for a given config.
    pub fn generate(config: &BeltConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let span = (config.outer_radius - config.inner_radius).max(0.0);
        let mut asteroids = Vec::with_capacity(config.count);

        for _ in 0..config.count {
            let radius = config.inner_radius + rng.random::<f64>() * span;
            let initial_angle = rng.random::<f64>() * TAU;
            let height = (rng.random::<f64>() - 0.5) * config.thickness;
            let shade = 0.5 + rng.random::<f32>() * 0.5;
            asteroids.push(Asteroid {
                radius,
                initial_angle,
                height,
                angular_speed: config.speed_factor / radius,
                shade,
            });
        }

        log::info!(
            "belt: generated {} asteroids in [{}, {})",
            asteroids.len(),
            config.inner_radius,
            config.outer_radius
        );
        Self { asteroids }
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    /// Positions of every asteroid at simulation time `t`.
    pub fn positions(&self, t: f64) -> impl Iterator<Item = DVec3> + '_ {
        self.asteroids.iter().map(move |a| a.position(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(seed: u64) -> BeltConfig {
        BeltConfig {
            count: 200,
            seed,
            ..BeltConfig::default()
        }
    }

    #[test]
    fn same_seed_same_belt() {
        let a = AsteroidBelt::generate(&small(7));
        let b = AsteroidBelt::generate(&small(7));
        assert_eq!(a.asteroids(), b.asteroids());

        let c = AsteroidBelt::generate(&small(8));
        assert_ne!(a.asteroids(), c.asteroids());
    }

    #[test]
    fn asteroids_stay_within_bounds() {
        let belt = AsteroidBelt::generate(&small(42));
        assert_eq!(belt.len(), 200);
        for a in belt.asteroids() {
            assert!(a.radius >= 35.0 && a.radius < 45.0, "radius {}", a.radius);
            assert!(a.height.abs() <= 1.0, "height {}", a.height);
            assert!(a.shade >= 0.5 && a.shade < 1.0, "shade {}", a.shade);
            assert!((a.angular_speed - 0.5 / a.radius).abs() < 1e-12);
        }
    }

    #[test]
    fn positions_lie_on_their_circle() {
        let belt = AsteroidBelt::generate(&small(3));
        for (a, p) in belt.asteroids().iter().zip(belt.positions(1234.5)) {
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!((planar - a.radius).abs() < 1e-9);
            assert_eq!(p.y, a.height);
        }
    }

    #[test]
    fn reversing_time_restores_positions() {
        let belt = AsteroidBelt::generate(&small(11));
        let start: Vec<DVec3> = belt.positions(10.0).collect();
        let back: Vec<DVec3> = belt.positions(10.0 + 500.0 - 500.0).collect();
        for (a, b) in start.iter().zip(&back) {
            assert!((*a - *b).length() < 1e-9);
        }
    }

    #[test]
    fn outer_asteroids_move_slower() {
        let inner = Asteroid { radius: 35.0, initial_angle: 0.0, height: 0.0, angular_speed: 0.5 / 35.0, shade: 0.7 };
        let outer = Asteroid { radius: 45.0, angular_speed: 0.5 / 45.0, ..inner };
        assert!(inner.angle(100.0) > outer.angle(100.0));
    }
}
