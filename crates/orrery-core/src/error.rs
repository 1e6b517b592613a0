//! Error types for load-time failures.
//!
//! Only static data (catalog, configuration, texture parameters) can fail.
//! Live input is clamped or ignored, never rejected.

/// Errors raised while loading or validating a scene catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog document is not valid JSON or does not match the schema.
    #[error("failed to parse catalog: {0}")]
    Parse(#[source] serde_json::Error),

    /// A color string is not of the form `#rrggbb`.
    #[error("body `{body}`: invalid color `{value}` (expected #rrggbb)")]
    InvalidColor { body: String, value: String },

    /// A body was declared with an empty name.
    #[error("body names must not be empty")]
    EmptyName,

    /// Two bodies share a name; the live object table is keyed by name.
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    /// Orbital period is zero, negative or not finite.
    #[error("body `{body}`: period must be positive and finite, got {period}")]
    InvalidPeriod { body: String, period: f64 },

    /// Body radius is zero, negative or not finite.
    #[error("body `{body}`: radius must be positive and finite, got {radius}")]
    InvalidRadius { body: String, radius: f64 },

    /// Orbital distance is negative or not finite.
    #[error("body `{body}`: distance must be non-negative and finite, got {distance}")]
    InvalidDistance { body: String, distance: f64 },

    /// Ring radii must satisfy `0 < inner < outer`.
    #[error("body `{body}`: ring radii must satisfy 0 < inner < outer, got {inner}..{outer}")]
    InvalidRings { body: String, inner: f64, outer: f64 },
}

/// Errors raised while parsing a simulation configuration override.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document is not valid JSON or has wrong field types.
    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Errors raised by the procedural texture generators.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TextureError {
    /// The base color is not of the form `#rrggbb`.
    #[error("invalid base color `{0}` (expected #rrggbb)")]
    InvalidColor(String),

    /// Detail level must be at least one pass.
    #[error("detail level must be a positive integer")]
    InvalidDetail,

    /// Texture side must be a non-zero power of two.
    #[error("texture size {0} is not a power of two")]
    InvalidSize(u32),
}
