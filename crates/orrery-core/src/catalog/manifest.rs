use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Scene catalog document describing the sun and every orbiting body.
/// Loaded from JSON at startup; bodies and moons keep document order.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogManifest {
    /// The central star.
    pub sun: SunDescriptor,
    /// Top-level bodies orbiting the sun: name → descriptor.
    #[serde(default, deserialize_with = "ordered_entries")]
    pub bodies: Vec<(String, BodyDescriptor)>,
}

/// Describes the central star.
#[derive(Debug, Clone, Deserialize)]
pub struct SunDescriptor {
    pub radius: f64,
    /// `#rrggbb`.
    pub color: String,
    #[serde(default)]
    pub info: String,
}

/// Describes one orbiting body and, recursively, its moons.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    pub radius: f64,
    /// Circular orbit radius around the parent.
    pub distance: f64,
    /// Time units per revolution.
    pub period: f64,
    /// `#rrggbb`.
    pub color: String,
    #[serde(default = "default_orbit_color")]
    pub orbit_color: String,
    #[serde(default)]
    pub info: String,
    /// Grouping for the object selector. Moons inherit their parent's.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub rings: Option<RingDescriptor>,
    /// Moons: name → descriptor.
    #[serde(default, deserialize_with = "ordered_entries")]
    pub moons: Vec<(String, BodyDescriptor)>,
}

/// Describes a flat ring system around a body (radii in world units).
#[derive(Debug, Clone, Deserialize)]
pub struct RingDescriptor {
    pub inner: f64,
    pub outer: f64,
    #[serde(default = "default_ring_color")]
    pub color: String,
    #[serde(default = "default_ring_opacity")]
    pub opacity: f32,
}

/// Object-selector grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sun,
    Inner,
    Outer,
    Dwarf,
}

impl Category {
    /// Selector order.
    pub const ALL: [Category; 4] = [Category::Sun, Category::Inner, Category::Outer, Category::Dwarf];

    /// Display label used by the object selector.
    pub fn label(self) -> &'static str {
        match self {
            Category::Sun => "Sun",
            Category::Inner => "Inner Planets & Moons",
            Category::Outer => "Outer Planets & Major Moons",
            Category::Dwarf => "Dwarf Planets",
        }
    }
}

/// Which procedural texture the host paints onto the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Surface {
    #[default]
    Rocky,
    GasGiant,
}

fn default_orbit_color() -> String {
    "#4169e1".to_string()
}

fn default_ring_color() -> String {
    "#b7b7b7".to_string()
}

fn default_ring_opacity() -> f32 {
    0.6
}

/// Deserialize a JSON object into `(key, value)` pairs in document order.
/// Duplicate keys are kept so validation can report them.
fn ordered_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of named bodies")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, value)) = map.next_entry::<String, V>()? {
                entries.push((name, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

impl CatalogManifest {
    /// Parse a catalog document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
