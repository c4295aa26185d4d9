//! Multi-octave fractal Brownian motion (fBm) over any 2D noise source.
//!
//! Each octave doubles the sampling frequency and halves the amplitude, so
//! finer detail contributes progressively less to the final value.

use noise::NoiseFn;

use crate::NoiseField;

/// Octave shaping for [`FractalSampler::sample_with`].
#[derive(Clone, Debug, PartialEq)]
pub struct FbmParams {
    /// Number of octaves to composite. Surface rules use 2–8.
    pub octaves: u32,
    /// Amplitude of the first octave. Default: 0.5.
    pub amplitude: f64,
    /// Frequency of the first octave. Default: 1.0.
    pub frequency: f64,
    /// Frequency multiplier between octaves. Default: 2.0.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves. Default: 0.5.
    pub persistence: f64,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            octaves: 6,
            amplitude: 0.5,
            frequency: 1.0,
            lacunarity: 2.0,
            persistence: 0.5,
        }
    }
}

impl FbmParams {
    /// Default shaping with the given octave count.
    pub fn with_octaves(octaves: u32) -> Self {
        Self {
            octaves,
            ..Default::default()
        }
    }

    /// Sum of all octave amplitudes: the bound on `|fbm|` for a source in `[-1, 1]`.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.amplitude.abs();
        for _ in 0..self.octaves {
            sum += amp;
            amp *= self.persistence.abs();
        }
        sum
    }
}

/// Composes samples of a noise source into fractal Brownian motion.
///
/// Generic over the source so the permutation-table [`NoiseField`] and any
/// `noise` crate generator can drive the same shading rules.
#[derive(Clone, Debug)]
pub struct FractalSampler<N = NoiseField> {
    noise: N,
}

impl<N: NoiseFn<f64, 2>> FractalSampler<N> {
    /// Wrap a noise source.
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Classic fBm: amplitude starts at 0.5 and frequency at 1.0.
    ///
    /// The result is bounded by `1 - 0.5^octaves`, which never reaches 1.
    pub fn fbm(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 0.5;
        let mut frequency = 1.0;
        for _ in 0..octaves {
            value += amplitude * self.noise.get([x * frequency, y * frequency]);
            frequency *= 2.0;
            amplitude *= 0.5;
        }
        value
    }

    /// fBm with explicit octave shaping.
    pub fn sample_with(&self, x: f64, y: f64, params: &FbmParams) -> f64 {
        let mut value = 0.0;
        let mut amplitude = params.amplitude;
        let mut frequency = params.frequency;
        for _ in 0..params.octaves {
            value += amplitude * self.noise.get([x * frequency, y * frequency]);
            frequency *= params.lacunarity;
            amplitude *= params.persistence;
        }
        value
    }

    /// A single raw sample of the underlying source.
    pub fn raw(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y])
    }

    /// The wrapped noise source.
    pub fn noise(&self) -> &N {
        &self.noise
    }
}

impl FractalSampler<NoiseField> {
    /// Convenience constructor over a freshly seeded [`NoiseField`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(NoiseField::new(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_fbm_bounded_by_geometric_series() {
        let sampler = FractalSampler::seeded(21);
        for octaves in 1..=8 {
            let bound = FbmParams::with_octaves(octaves).max_amplitude();
            for i in 0..400 {
                let x = i as f64 * 0.313;
                let y = i as f64 * 0.151 + 3.0;
                let v = sampler.fbm(x, y, octaves);
                assert!(
                    v.abs() <= bound + EPSILON,
                    "octaves={octaves}: |{v}| exceeds bound {bound}"
                );
            }
        }
    }

    #[test]
    fn test_octave_eight_stays_near_octave_one() {
        let sampler = FractalSampler::seeded(4);
        // Octaves 2..8 add at most 0.25 + 0.125 + ... < 0.5.
        let tail = FbmParams::with_octaves(8).max_amplitude() - 0.5;
        for i in 0..500 {
            let x = i as f64 * 0.097;
            let y = 1.0 - i as f64 * 0.043;
            let one = sampler.fbm(x, y, 1);
            let eight = sampler.fbm(x, y, 8);
            assert!(
                (eight - one).abs() <= tail + EPSILON,
                "Higher octaves moved the value by {} (> {tail})",
                (eight - one).abs()
            );
        }
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        let sampler = FractalSampler::seeded(1);
        assert_eq!(sampler.fbm(12.3, 4.5, 0), 0.0);
    }

    #[test]
    fn test_default_params_match_fbm() {
        let sampler = FractalSampler::seeded(77);
        let params = FbmParams::with_octaves(5);
        for i in 0..50 {
            let x = i as f64 * 0.41;
            let a = sampler.fbm(x, 0.9, 5);
            let b = sampler.sample_with(x, 0.9, &params);
            assert!((a - b).abs() < EPSILON, "fbm {a} vs sample_with {b}");
        }
    }

    #[test]
    fn test_max_amplitude_calculation() {
        let params = FbmParams {
            octaves: 4,
            amplitude: 1000.0,
            ..Default::default()
        };
        assert!((params.max_amplitude() - 1875.0).abs() < EPSILON);
        assert!((FbmParams::with_octaves(1).max_amplitude() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_more_octaves_adds_detail() {
        let sampler = FractalSampler::seeded(7);
        let step = 0.05;
        let (mut rough_1, mut rough_8) = (0.0, 0.0);
        for i in 0..2000 {
            let x = i as f64 * step;
            rough_1 += (sampler.fbm(x + step, 0.3, 1) - sampler.fbm(x, 0.3, 1)).abs();
            rough_8 += (sampler.fbm(x + step, 0.3, 8) - sampler.fbm(x, 0.3, 8)).abs();
        }
        assert!(
            rough_8 > rough_1,
            "8 octaves should vary faster than 1: {rough_8} vs {rough_1}"
        );
    }

    #[test]
    fn test_external_noise_source_plugs_in() {
        let sampler = FractalSampler::new(noise::Perlin::new(3));
        let v = sampler.fbm(0.37, 0.81, 4);
        assert!(v.is_finite());
        assert!(v.abs() <= 2.0);
    }
}
