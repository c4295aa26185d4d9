//! Translucent cloud layer: white pixels whose alpha carries the noise.

use orrery_noise::NoiseField;

use crate::{SurfaceSynthesizer, SynthesisError, Texture, bitmap::channel};

/// Shape of the cloud layer.
#[derive(Clone, Debug, PartialEq)]
pub struct CloudParams {
    /// Pixels per lattice cell of the broad pass.
    pub coarse_scale: f64,
    /// Pixels per lattice cell of the detail pass.
    pub fine_scale: f64,
    pub fine_weight: f64,
    /// Noise value at which clouds start.
    pub threshold: f64,
    /// Alpha per unit of noise above the threshold test.
    pub opacity: f64,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            coarse_scale: 30.0,
            fine_scale: 10.0,
            fine_weight: 0.3,
            threshold: 0.15,
            opacity: 220.0,
        }
    }
}

impl CloudParams {
    /// Alpha for a pixel. Zero below the threshold.
    pub fn alpha(&self, noise: &NoiseField, x: f64, y: f64) -> u8 {
        let n = noise.sample(x / self.coarse_scale, y / self.coarse_scale)
            + noise.sample(x / self.fine_scale, y / self.fine_scale) * self.fine_weight;
        if n > self.threshold {
            channel(n * self.opacity)
        } else {
            0
        }
    }
}

impl SurfaceSynthesizer {
    /// Cloud layer with default shape.
    pub fn clouds(&self, seed: u64) -> Result<Texture, SynthesisError> {
        self.clouds_with(&CloudParams::default(), seed)
    }

    pub fn clouds_with(&self, params: &CloudParams, seed: u64) -> Result<Texture, SynthesisError> {
        let size = self.check_resolution(self.settings().cloud_resolution)?;
        let noise = NoiseField::new(seed);
        Texture::from_fn(size, size, |x, y| {
            [255, 255, 255, params.alpha(&noise, x as f64, y as f64)]
        })
    }
}
