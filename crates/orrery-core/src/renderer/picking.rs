//! Ray casting against bodies and orbit paths.

use glam::DVec3;

use crate::api::types::BodyId;
use crate::catalog::Catalog;
use crate::core::orbit::OrbitalState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit length.
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative hit distance against a sphere.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt = disc.sqrt();
        let near = -b - sqrt;
        let far = -b + sqrt;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Origin inside the sphere.
            Some(far)
        } else {
            None
        }
    }

    /// Hit distance against the horizontal plane `y = height`.
    pub fn intersect_plane_y(&self, height: f64) -> Option<f64> {
        if self.direction.y.abs() < 1e-12 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then_some(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Body,
    Orbit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    pub target: PickTarget,
    /// Distance along the ray.
    pub distance: f64,
}

/// Body meshes are tested first; orbit paths only when no body is hit.
/// Nearest hit along the ray wins within each pass.
pub fn pick(ray: &Ray, catalog: &Catalog, orbits: &OrbitalState, orbit_threshold: f64) -> Option<PickHit> {
    pick_body(ray, catalog, orbits).or_else(|| pick_orbit(ray, catalog, orbits, orbit_threshold))
}

pub fn pick_body(ray: &Ray, catalog: &Catalog, orbits: &OrbitalState) -> Option<PickHit> {
    catalog
        .iter()
        .filter_map(|node| {
            let center = orbits.world_position(node.id)?;
            let distance = ray.intersect_sphere(center, node.radius)?;
            Some(PickHit {
                body: node.id,
                target: PickTarget::Body,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

pub fn pick_orbit(ray: &Ray, catalog: &Catalog, orbits: &OrbitalState, threshold: f64) -> Option<PickHit> {
    catalog
        .iter()
        .filter_map(|node| {
            let orbit = node.orbit?;
            let center = orbits.world_position(node.parent?)?;
            let distance = ray.intersect_plane_y(center.y)?;
            let p = ray.at(distance);
            let from_center = (p - center).length();
            ((from_center - orbit.distance).abs() <= threshold).then_some(PickHit {
                body: node.id,
                target: PickTarget::Orbit,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
