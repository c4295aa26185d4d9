//! Registration errors. All of them are configuration mistakes and are
//! reported before the first frame.

/// Why a body tree was rejected.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// A radius or orbital distance that would produce NaN or collapsed geometry.
    #[error("body '{body}' has degenerate {field}: {value}")]
    DegenerateGeometry {
        body: String,
        field: &'static str,
        value: f64,
    },

    /// Two bodies share an identity.
    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    /// The root body must sit at the origin.
    #[error("root body '{body}' must have zero orbital distance, got {distance}")]
    RootOrbit { body: String, distance: f64 },

    /// Ring radii out of order or non-positive.
    #[error("body '{body}' has invalid ring radii: inner {inner}, outer {outer}")]
    InvalidRing { body: String, inner: f64, outer: f64 },

    /// No body with this index exists in the tree.
    #[error("unknown body id {0}")]
    UnknownId(u32),

    /// A catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Read(#[source] std::io::Error),

    /// A catalog file could not be parsed.
    #[error("failed to parse catalog: {0}")]
    Catalog(#[source] ron::error::SpannedError),

    /// A catalog could not be serialized.
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] ron::Error),
}
