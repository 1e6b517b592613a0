use std::f64::consts::TAU;

use glam::DVec3;
use serde::Serialize;

use crate::api::types::Rgb;
use crate::catalog::manifest::{BodyDescriptor, Category, RingDescriptor, SunDescriptor, Surface};
use crate::error::CatalogError;

/// Circular orbit in the parent's XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircularOrbit {
    /// Orbit radius around the parent's current position.
    pub distance: f64,
    /// Time units per revolution. Always > 0 once the catalog is validated;
    /// `local_position` does not guard against zero.
    pub period: f64,
}

impl CircularOrbit {
    pub fn new(distance: f64, period: f64) -> Self {
        Self { distance, period }
    }

    /// Orbital angle (radians) at simulation time `t`.
    #[inline]
    pub fn angle(&self, t: f64) -> f64 {
        (t / self.period) * TAU
    }

    /// Offset from the parent at simulation time `t`.
    pub fn local_position(&self, t: f64) -> DVec3 {
        let angle = self.angle(t);
        DVec3::new(angle.cos() * self.distance, 0.0, angle.sin() * self.distance)
    }

    /// Closed polyline of `segments + 1` points tracing the orbit, relative to the parent.
    pub fn path(&self, segments: usize) -> Vec<DVec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| {
                let theta = (i as f64 / segments as f64) * TAU;
                DVec3::new(theta.cos() * self.distance, 0.0, theta.sin() * self.distance)
            })
            .collect()
    }
}

/// Flat ring system drawn in the body's equatorial plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rings {
    pub inner: f64,
    pub outer: f64,
    pub color: Rgb,
    pub opacity: f32,
}

/// A celestial body and its moons, as a uniform recursive tree.
///
/// The root (the sun) has no orbit; every other body has one.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub radius: f64,
    pub orbit: Option<CircularOrbit>,
    pub color: Rgb,
    pub orbit_color: Rgb,
    pub info: String,
    pub category: Category,
    pub surface: Surface,
    pub rings: Option<Rings>,
    pub moons: Vec<CelestialBody>,
}

impl CelestialBody {
    /// A central star: no orbit, category `Sun`.
    pub fn star(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit: None,
            color: Rgb::from_u32(0xffff00),
            orbit_color: Rgb::WHITE,
            info: String::new(),
            category: Category::Sun,
            surface: Surface::Rocky,
            rings: None,
            moons: Vec::new(),
        }
    }

    /// A body on a circular orbit around whatever it is attached to.
    pub fn orbiting(name: impl Into<String>, radius: f64, distance: f64, period: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            orbit: Some(CircularOrbit::new(distance, period)),
            color: Rgb::WHITE,
            orbit_color: Rgb::from_u32(0x4169e1),
            info: String::new(),
            category: Category::Inner,
            surface: Surface::Rocky,
            rings: None,
            moons: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_rings(mut self, rings: Rings) -> Self {
        self.rings = Some(rings);
        self
    }

    /// Attach a moon (or, for the root, a planet).
    pub fn with_moon(mut self, moon: CelestialBody) -> Self {
        self.moons.push(moon);
        self
    }

    /// Build the root from the sun descriptor; top-level bodies are attached afterwards.
    pub(crate) fn from_sun(name: &str, desc: &SunDescriptor) -> Result<Self, CatalogError> {
        Ok(Self::star(name, desc.radius)
            .with_color(parse_color(name, &desc.color)?)
            .with_info(desc.info.clone()))
    }

    /// Convert a descriptor (and its moons) into a body. Colors are parsed here;
    /// numeric ranges are checked when the catalog is assembled.
    pub(crate) fn from_descriptor(
        name: &str,
        desc: &BodyDescriptor,
        inherited: Option<Category>,
    ) -> Result<Self, CatalogError> {
        let category = desc.category.or(inherited).unwrap_or(Category::Inner);
        let rings = desc
            .rings
            .as_ref()
            .map(|r| parse_rings(name, r))
            .transpose()?;

        let moons = desc
            .moons
            .iter()
            .map(|(moon_name, moon)| Self::from_descriptor(moon_name, moon, Some(category)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_string(),
            radius: desc.radius,
            orbit: Some(CircularOrbit::new(desc.distance, desc.period)),
            color: parse_color(name, &desc.color)?,
            orbit_color: parse_color(name, &desc.orbit_color)?,
            info: desc.info.clone(),
            category,
            surface: desc.surface,
            rings,
            moons,
        })
    }

    /// Check this body's own numeric invariants (not its moons).
    pub(crate) fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CatalogError::InvalidRadius {
                body: self.name.clone(),
                radius: self.radius,
            });
        }
        if let Some(orbit) = &self.orbit {
            if !(orbit.distance.is_finite() && orbit.distance >= 0.0) {
                return Err(CatalogError::InvalidDistance {
                    body: self.name.clone(),
                    distance: orbit.distance,
                });
            }
            if !(orbit.period.is_finite() && orbit.period > 0.0) {
                return Err(CatalogError::InvalidPeriod {
                    body: self.name.clone(),
                    period: orbit.period,
                });
            }
        }
        if let Some(rings) = &self.rings {
            if !(rings.inner > 0.0 && rings.inner < rings.outer && rings.outer.is_finite()) {
                return Err(CatalogError::InvalidRings {
                    body: self.name.clone(),
                    inner: rings.inner,
                    outer: rings.outer,
                });
            }
        }
        Ok(())
    }
}

fn parse_color(body: &str, value: &str) -> Result<Rgb, CatalogError> {
    Rgb::from_hex(value).ok_or_else(|| CatalogError::InvalidColor {
        body: body.to_string(),
        value: value.to_string(),
    })
}

fn parse_rings(body: &str, desc: &RingDescriptor) -> Result<Rings, CatalogError> {
    Ok(Rings {
        inner: desc.inner,
        outer: desc.outer,
        color: parse_color(body, &desc.color)?,
        opacity: desc.opacity.clamp(0.0, 1.0),
    })
}
