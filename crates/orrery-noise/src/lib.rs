//! Seeded 2D gradient noise and fractal Brownian motion for surface synthesis.

mod field;
mod fractal;
mod seed;

pub use field::NoiseField;
pub use fractal::{FbmParams, FractalSampler};
pub use seed::{derive_seed, seeded_rng};
