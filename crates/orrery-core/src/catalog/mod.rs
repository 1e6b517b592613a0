//! Scene catalog: the immutable set of celestial bodies.
//!
//! The recursive `CelestialBody` tree is flattened at load into an arena of
//! `BodyNode`s in depth-first order. `BodyId(0)` is the sun; every node knows
//! its parent and children, so per-frame traversal never re-walks the tree
//! structure from the descriptors.

pub mod body;
pub mod manifest;

use std::collections::HashMap;

use serde::Serialize;

use crate::api::types::{BodyId, Rgb};
use crate::error::CatalogError;

pub use body::{CelestialBody, CircularOrbit, Rings};
pub use manifest::{BodyDescriptor, CatalogManifest, Category, RingDescriptor, SunDescriptor, Surface};

/// Name given to the catalog root.
pub const SUN_NAME: &str = "Sun";

/// Built-in solar system catalog.
pub const SOLAR_SYSTEM_JSON: &str = include_str!("solar_system.json");

/// One body in the flattened catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyNode {
    pub id: BodyId,
    pub parent: Option<BodyId>,
    pub children: Vec<BodyId>,
    pub name: String,
    pub radius: f64,
    pub orbit: Option<CircularOrbit>,
    pub color: Rgb,
    pub orbit_color: Rgb,
    pub info: String,
    pub category: Category,
    pub surface: Surface,
    pub rings: Option<Rings>,
}

/// Object-selector group: a category label and the body names in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectGroup {
    pub category: Category,
    pub label: &'static str,
    pub names: Vec<String>,
}

/// Flat, validated, name-indexed body storage.
#[derive(Debug, Clone)]
pub struct Catalog {
    nodes: Vec<BodyNode>,
    by_name: HashMap<String, BodyId>,
}

impl Catalog {
    /// Parse and validate a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let manifest = CatalogManifest::from_json(json).map_err(CatalogError::Parse)?;
        Self::from_manifest(&manifest)
    }

    /// The built-in solar system.
    pub fn solar_system() -> Result<Self, CatalogError> {
        Self::from_json(SOLAR_SYSTEM_JSON)
    }

    /// Build from a parsed manifest. The sun becomes the root, named `Sun`.
    pub fn from_manifest(manifest: &CatalogManifest) -> Result<Self, CatalogError> {
        let mut root = CelestialBody::from_sun(SUN_NAME, &manifest.sun)?;
        for (name, desc) in &manifest.bodies {
            root.moons.push(CelestialBody::from_descriptor(name, desc, None)?);
        }
        Self::from_tree(root)
    }

    /// Flatten and validate a body tree. Fails on the first invalid body.
    pub fn from_tree(root: CelestialBody) -> Result<Self, CatalogError> {
        let mut catalog = Self {
            nodes: Vec::new(),
            by_name: HashMap::new(),
        };
        catalog.insert_recursive(root, None)?;

        log::info!(
            "catalog: loaded {} bodies ({} top-level)",
            catalog.nodes.len(),
            catalog.root().children.len()
        );
        Ok(catalog)
    }

    fn insert_recursive(
        &mut self,
        mut body: CelestialBody,
        parent: Option<BodyId>,
    ) -> Result<BodyId, CatalogError> {
        body.validate()?;
        if self.by_name.contains_key(&body.name) {
            return Err(CatalogError::DuplicateName(body.name));
        }

        let id = BodyId(self.nodes.len() as u32);
        let moons = std::mem::take(&mut body.moons);
        self.by_name.insert(body.name.clone(), id);
        self.nodes.push(BodyNode {
            id,
            parent,
            children: Vec::with_capacity(moons.len()),
            name: body.name,
            radius: body.radius,
            orbit: body.orbit,
            color: body.color,
            orbit_color: body.orbit_color,
            info: body.info,
            category: body.category,
            surface: body.surface,
            rings: body.rings,
        });

        for moon in moons {
            let child = self.insert_recursive(moon, Some(id))?;
            self.nodes[id.index()].children.push(child);
        }
        Ok(id)
    }

    /// The sun.
    pub fn root(&self) -> &BodyNode {
        &self.nodes[BodyId::ROOT.index()]
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyNode> {
        self.nodes.get(id.index())
    }

    /// Look up a body by its unique name.
    pub fn find_by_name(&self, name: &str) -> Option<&BodyNode> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    /// Iterate over all bodies in depth-first order (root first).
    pub fn iter(&self) -> impl Iterator<Item = &BodyNode> {
        self.nodes.iter()
    }

    /// Number of bodies, including the sun.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Selector groups in fixed category order; empty groups are omitted.
    pub fn groups(&self) -> Vec<ObjectGroup> {
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let names: Vec<String> = self
                    .nodes
                    .iter()
                    .filter(|n| n.category == category)
                    .map(|n| n.name.clone())
                    .collect();
                (!names.is_empty()).then(|| ObjectGroup {
                    category,
                    label: category.label(),
                    names,
                })
            })
            .collect()
    }
}
