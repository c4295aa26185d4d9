//! Celestial body descriptors, the validated body tree, and the built-in catalog.

pub mod catalog;
mod color;
mod descriptor;
mod error;
mod tree;

pub use color::{ColorParseError, Rgb};
pub use descriptor::{
    Atmosphere, BandPalette, BodyCategory, BodyDescriptor, BodyDetails, RingDescriptor,
    SurfaceKind,
};
pub use error::BodyError;
pub use tree::{BodyId, BodyNode, BodyTree};
