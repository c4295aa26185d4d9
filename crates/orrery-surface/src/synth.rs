//! Procedural surface synthesis.
//!
//! Synthesis is `O(resolution^2 * octaves)` and runs once per body at
//! registration, never inside the frame tick.

use orrery_bodies::{BodyDescriptor, RingDescriptor};
use orrery_noise::FractalSampler;

use crate::{Pixel, RingGradient, SurfaceArchetype, SynthesisError, Texture};

/// Default square bitmap side.
pub const DEFAULT_RESOLUTION: u32 = 512;
/// Largest accepted bitmap side.
pub const DEFAULT_MAX_RESOLUTION: u32 = 4096;
/// Default ring band width in pixels.
pub const DEFAULT_RING_WIDTH: u32 = 256;

/// Bitmap sizes for each layer.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisSettings {
    pub resolution: u32,
    pub cloud_resolution: u32,
    pub ring_width: u32,
    pub max_resolution: u32,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            cloud_resolution: DEFAULT_RESOLUTION,
            ring_width: DEFAULT_RING_WIDTH,
            max_resolution: DEFAULT_MAX_RESOLUTION,
        }
    }
}

/// Produces surface, cloud and ring bitmaps for bodies.
///
/// Every call builds its own noise field from the seed it is given, so
/// identical `(archetype, seed)` pairs always yield identical bitmaps.
#[derive(Clone, Debug, Default)]
pub struct SurfaceSynthesizer {
    settings: SynthesisSettings,
}

impl SurfaceSynthesizer {
    pub fn new(settings: SynthesisSettings) -> Self {
        Self { settings }
    }

    /// Synthesizer producing `resolution`-sided surfaces with default limits.
    pub fn with_resolution(resolution: u32) -> Self {
        Self::new(SynthesisSettings {
            resolution,
            cloud_resolution: resolution,
            ..SynthesisSettings::default()
        })
    }

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    pub(crate) fn check_resolution(&self, requested: u32) -> Result<u32, SynthesisError> {
        if requested == 0 {
            return Err(SynthesisError::ZeroResolution);
        }
        if requested > self.settings.max_resolution {
            return Err(SynthesisError::ResolutionTooLarge {
                requested,
                max: self.settings.max_resolution,
            });
        }
        Ok(requested)
    }

    /// Paint a square bitmap with `archetype`'s rule.
    pub fn synthesize(
        &self,
        archetype: &SurfaceArchetype,
        seed: u64,
    ) -> Result<Texture, SynthesisError> {
        let size = self.check_resolution(self.settings.resolution)?;
        let fractal = FractalSampler::seeded(seed);
        Texture::from_fn(size, size, |x, y| {
            archetype.shade(&fractal, Pixel::new(x, y, size))
        })
    }

    /// Surface bitmap for a body, with the archetype taken from its descriptor.
    pub fn surface(&self, body: &BodyDescriptor, seed: u64) -> Result<Texture, SynthesisError> {
        let archetype = SurfaceArchetype::for_body(body);
        log::debug!(
            "Synthesizing {} surface for '{}' at {}px",
            archetype.name(),
            body.name,
            self.settings.resolution
        );
        self.synthesize(&archetype, seed)
    }

    /// Radial band for a ring.
    pub fn ring(&self, ring: &RingDescriptor) -> Result<Texture, SynthesisError> {
        let width = self.check_resolution(self.settings.ring_width)?;
        RingGradient::for_ring(ring).rasterize(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OceanicRule;
    use orrery_bodies::{BodyCategory, Rgb, SurfaceKind};

    fn earth() -> BodyDescriptor {
        BodyDescriptor::new("Earth", BodyCategory::Planet, 4.0, 45.0, 1.0, Rgb::new(45, 59, 110))
            .with_surface(SurfaceKind::Oceanic)
    }

    #[derive(Debug, PartialEq)]
    enum Class {
        Ice,
        Land,
        Ocean,
    }

    fn classify(p: [u8; 4]) -> Class {
        if p == OceanicRule::ICE {
            Class::Ice
        } else if p[2] > 120 {
            Class::Ocean
        } else {
            Class::Land
        }
    }

    #[test]
    fn test_terrestrial_has_ice_land_and_ocean() {
        let tex = SurfaceSynthesizer::with_resolution(256)
            .surface(&earth(), 42)
            .unwrap();
        let mut counts = [0usize; 3];
        for &p in tex.pixels() {
            match classify(p) {
                Class::Ice => counts[0] += 1,
                Class::Land => counts[1] += 1,
                Class::Ocean => counts[2] += 1,
            }
        }
        assert!(counts.iter().all(|&c| c > 0), "color classes: {counts:?}");
    }

    #[test]
    fn test_surface_is_opaque_and_square() {
        let synth = SurfaceSynthesizer::with_resolution(64);
        for kind in [
            SurfaceKind::Oceanic,
            SurfaceKind::Arid,
            SurfaceKind::Rocky,
            SurfaceKind::Stellar,
            SurfaceKind::Banded {
                bands: 12,
                palette: orrery_bodies::BandPalette::Ochre,
                storm: true,
            },
        ] {
            let tex = synth.surface(&earth().with_surface(kind), 3).unwrap();
            assert_eq!(tex.dimensions(), (64, 64));
            assert!(tex.is_opaque(), "{kind:?} must be opaque");
        }
    }

    #[test]
    fn test_same_seed_same_bitmap() {
        let synth = SurfaceSynthesizer::with_resolution(48);
        let a = synth.surface(&earth(), 9).unwrap();
        let b = synth.surface(&earth(), 9).unwrap();
        let c = synth.surface(&earth(), 10).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_resolution_limits() {
        let zero = SurfaceSynthesizer::with_resolution(0);
        assert!(matches!(
            zero.surface(&earth(), 1),
            Err(SynthesisError::ZeroResolution)
        ));

        let huge = SurfaceSynthesizer::new(SynthesisSettings {
            resolution: 8192,
            ..SynthesisSettings::default()
        });
        assert!(matches!(
            huge.surface(&earth(), 1),
            Err(SynthesisError::ResolutionTooLarge {
                requested: 8192,
                max: 4096
            })
        ));
    }

    #[test]
    fn test_ring_band() {
        let ring = RingDescriptor {
            inner_radius: 7.0,
            outer_radius: 10.0,
            color: Some(Rgb::WHITE),
            tilt: [0.0; 3],
            has_gaps: false,
        };
        let tex = SurfaceSynthesizer::default().ring(&ring).unwrap();
        assert_eq!(tex.dimensions(), (DEFAULT_RING_WIDTH, 1));
    }
}
