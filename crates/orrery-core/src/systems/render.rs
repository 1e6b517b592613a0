use crate::api::types::BodyId;
use crate::catalog::{Catalog, Surface};
use crate::core::belt::AsteroidBelt;
use crate::core::orbit::OrbitalState;
use crate::renderer::instance::{AsteroidInstance, BodyInstance, InstanceBuffer};

/// Rebuild the instance buffer from the current orbital state.
/// Bodies come out in catalog order; entries beyond the capacities are dropped.
pub fn build_instance_buffer(
    catalog: &Catalog,
    orbits: &OrbitalState,
    belt: &AsteroidBelt,
    max_bodies: usize,
    max_asteroids: usize,
    buffer: &mut InstanceBuffer,
) {
    buffer.clear();

    for node in catalog.iter().take(max_bodies) {
        let Some(pos) = orbits.world_position(node.id) else {
            continue;
        };
        let [r, g, b] = node.color.to_array();
        buffer.bodies.push(BodyInstance {
            x: pos.x as f32,
            y: pos.y as f32,
            z: pos.z as f32,
            radius: node.radius as f32,
            spin: orbits.spin(node.id).unwrap_or(0.0) as f32,
            r,
            g,
            b,
            emissive: if node.id == BodyId::ROOT { 1.0 } else { 0.0 },
            surface: match node.surface {
                Surface::Rocky => 0.0,
                Surface::GasGiant => 1.0,
            },
            rings: if node.rings.is_some() { 1.0 } else { 0.0 },
            body_id: node.id.0 as f32,
        });
    }

    let t = orbits.simulation_time();
    for asteroid in belt.asteroids().iter().take(max_asteroids) {
        let pos = asteroid.position(t);
        buffer.asteroids.push(AsteroidInstance {
            x: pos.x as f32,
            y: pos.y as f32,
            z: pos.z as f32,
            shade: asteroid.shade,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CelestialBody, Rings};
    use crate::api::types::Rgb;
    use crate::core::belt::BeltConfig;

    fn catalog() -> Catalog {
        Catalog::from_tree(
            CelestialBody::star("Sun", 8.0)
                .with_moon(CelestialBody::orbiting("Earth", 1.6, 20.0, 365.0))
                .with_moon(
                    CelestialBody::orbiting("Saturn", 4.5, 80.0, 10759.0)
                        .with_surface(Surface::GasGiant)
                        .with_rings(Rings { inner: 5.0, outer: 8.0, color: Rgb::from_u32(0xb7b7b7), opacity: 0.6 }),
                ),
        )
        .unwrap()
    }

    #[test]
    fn one_instance_per_body() {
        let catalog = catalog();
        let orbits = OrbitalState::new(&catalog);
        let belt = AsteroidBelt::generate(&BeltConfig { count: 10, ..BeltConfig::default() });
        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(&catalog, &orbits, &belt, 64, 2048, &mut buffer);

        assert_eq!(buffer.body_count(), 3);
        assert_eq!(buffer.asteroid_count(), 10);

        let sun = buffer.bodies[0];
        assert_eq!(sun.emissive, 1.0);
        assert_eq!(sun.radius, 8.0);

        let earth = buffer.bodies[1];
        assert_eq!((earth.x, earth.y, earth.z), (20.0, 0.0, 0.0));
        assert_eq!(earth.emissive, 0.0);

        let saturn = buffer.bodies[2];
        assert_eq!(saturn.surface, 1.0);
        assert_eq!(saturn.rings, 1.0);
        assert_eq!(saturn.body_id, 2.0);
    }

    #[test]
    fn capacities_truncate() {
        let catalog = catalog();
        let orbits = OrbitalState::new(&catalog);
        let belt = AsteroidBelt::generate(&BeltConfig { count: 10, ..BeltConfig::default() });
        let mut buffer = InstanceBuffer::new();
        build_instance_buffer(&catalog, &orbits, &belt, 2, 4, &mut buffer);
        assert_eq!(buffer.body_count(), 2);
        assert_eq!(buffer.asteroid_count(), 4);
    }
}
