//! Procedural texture synthesis for celestial bodies.
//!
//! [`SurfaceSynthesizer`] paints surface, cloud and ring bitmaps from seeded
//! fractal noise. [`BodyMaterials::resolve`] wraps it with a [`TextureCache`]
//! and degrades each failing layer to a flat color.

mod archetype;
mod bitmap;
mod cache;
mod clouds;
mod error;
mod export;
mod material;
mod ring;
mod synth;

pub use archetype::{
    AridRule, BandColors, BandedRule, NOISE_SCALE, OceanicRule, Pixel, RockyRule, StellarRule,
    Storm, SurfaceArchetype,
};
pub use bitmap::Texture;
pub use cache::{TextureCache, TextureLayer, fingerprint};
pub use clouds::CloudParams;
pub use error::SynthesisError;
pub use export::{encode_png, write_png};
pub use material::{BodyMaterials, Material};
pub use ring::{GradientStop, RING_GAPS, RingGradient};
pub use synth::{
    DEFAULT_MAX_RESOLUTION, DEFAULT_RESOLUTION, DEFAULT_RING_WIDTH, SurfaceSynthesizer,
    SynthesisSettings,
};
