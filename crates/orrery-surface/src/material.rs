//! Render materials with per-body fallback.

use std::sync::Arc;

use orrery_bodies::{BodyDescriptor, Rgb};

use crate::cache::fingerprint;
use crate::{SurfaceSynthesizer, SynthesisError, Texture, TextureCache, TextureLayer};

/// What the renderer should bind for one layer of a body.
#[derive(Clone, Debug, PartialEq)]
pub enum Material {
    /// A synthesized bitmap.
    Textured(Arc<Texture>),
    /// An externally supplied asset reference, loaded by the renderer.
    External(String),
    /// Solid color used when synthesis failed.
    FlatColor(Rgb),
}

impl Material {
    pub fn texture(&self) -> Option<&Arc<Texture>> {
        match self {
            Self::Textured(texture) => Some(texture),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FlatColor(_))
    }
}

/// All materials of a body, plus the first synthesis failure across its
/// layers, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyMaterials {
    pub surface: Material,
    pub clouds: Option<Material>,
    pub ring: Option<Material>,
    pub failure: Option<String>,
}

impl BodyMaterials {
    /// Resolve every layer for `body`, synthesizing through `cache`.
    ///
    /// A failing layer degrades to a flat color on its own; it never aborts
    /// the other layers or other bodies. Cache entries for layers the body no
    /// longer has are evicted.
    pub fn resolve(
        body: &BodyDescriptor,
        synth: &SurfaceSynthesizer,
        cache: &mut TextureCache,
        seed: u64,
    ) -> Self {
        let print = fingerprint(body, synth.settings(), seed);
        let mut failure = None;

        let surface = match &body.texture_override {
            Some(reference) => {
                cache.invalidate_layer(&body.name, TextureLayer::Surface);
                Material::External(reference.clone())
            }
            None => {
                let result = cache.get_or_synthesize(&body.name, TextureLayer::Surface, print, || {
                    synth.surface(body, seed)
                });
                fallback(body, result, body.color, &mut failure)
            }
        };

        if !body.clouds {
            cache.invalidate_layer(&body.name, TextureLayer::Clouds);
        }
        if body.ring.is_none() {
            cache.invalidate_layer(&body.name, TextureLayer::Ring);
        }

        let clouds = body.clouds.then(|| {
            let result = cache.get_or_synthesize(&body.name, TextureLayer::Clouds, print, || {
                synth.clouds(orrery_noise::derive_seed(seed, "clouds"))
            });
            fallback(body, result, Rgb::WHITE, &mut failure)
        });

        let ring = body.ring.as_ref().map(|ring| {
            let result = cache.get_or_synthesize(&body.name, TextureLayer::Ring, print, || {
                synth.ring(ring)
            });
            fallback(body, result, ring.color.unwrap_or(Rgb::WHITE), &mut failure)
        });

        Self {
            surface,
            clouds,
            ring,
            failure,
        }
    }

    /// Every present layer, surface first.
    pub fn layers(&self) -> impl Iterator<Item = (TextureLayer, &Material)> {
        std::iter::once((TextureLayer::Surface, &self.surface))
            .chain(self.clouds.iter().map(|m| (TextureLayer::Clouds, m)))
            .chain(self.ring.iter().map(|m| (TextureLayer::Ring, m)))
    }

    /// True if any layer fell back to a flat color.
    pub fn synthesis_failed(&self) -> bool {
        self.failure.is_some()
    }
}

fn fallback(
    body: &BodyDescriptor,
    result: Result<Arc<Texture>, SynthesisError>,
    color: Rgb,
    failure: &mut Option<String>,
) -> Material {
    match result {
        Ok(texture) => Material::Textured(texture),
        Err(err) => {
            log::warn!("Texture synthesis failed for '{}', using flat color: {err}", body.name);
            failure.get_or_insert_with(|| err.to_string());
            Material::FlatColor(color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SynthesisSettings;
    use orrery_bodies::{BodyCategory, RingDescriptor};

    fn saturn() -> BodyDescriptor {
        BodyDescriptor::new("Saturn", BodyCategory::Planet, 8.0, 130.0, 0.03, Rgb::new(234, 214, 184))
            .with_ring(RingDescriptor {
                inner_radius: 10.0,
                outer_radius: 18.0,
                color: None,
                tilt: [0.0; 3],
                has_gaps: true,
            })
    }

    #[test]
    fn test_resolves_all_layers() {
        let synth = SurfaceSynthesizer::with_resolution(16);
        let mut cache = TextureCache::new();
        let mats = BodyMaterials::resolve(&saturn().with_clouds(), &synth, &mut cache, 1);
        assert!(mats.surface.texture().is_some());
        assert!(mats.clouds.as_ref().and_then(Material::texture).is_some());
        assert!(mats.ring.as_ref().and_then(Material::texture).is_some());
        assert!(!mats.synthesis_failed());
        assert_eq!(cache.len(), 3);
        let layers: Vec<_> = mats.layers().map(|(layer, _)| layer).collect();
        assert_eq!(
            layers,
            [TextureLayer::Surface, TextureLayer::Clouds, TextureLayer::Ring]
        );
    }

    #[test]
    fn test_failure_falls_back_to_base_color() {
        let synth = SurfaceSynthesizer::new(SynthesisSettings {
            resolution: 0,
            ..SynthesisSettings::default()
        });
        let mut cache = TextureCache::new();
        let body = saturn();
        let mats = BodyMaterials::resolve(&body, &synth, &mut cache, 1);
        assert_eq!(mats.surface, Material::FlatColor(body.color));
        assert!(mats.synthesis_failed());
        // The ring layer is sized independently and still succeeds.
        assert!(mats.ring.as_ref().and_then(Material::texture).is_some());
    }

    #[test]
    fn test_override_skips_synthesis() {
        let synth = SurfaceSynthesizer::with_resolution(16);
        let mut cache = TextureCache::new();
        let mut body = saturn().with_clouds();
        BodyMaterials::resolve(&body, &synth, &mut cache, 1);
        assert_eq!(cache.len(), 3);

        body.texture_override = Some("textures/saturn.jpg".into());
        let mats = BodyMaterials::resolve(&body, &synth, &mut cache, 1);
        assert_eq!(mats.surface, Material::External("textures/saturn.jpg".into()));
        assert!(mats.clouds.as_ref().and_then(Material::texture).is_some());
        assert!(mats.ring.as_ref().and_then(Material::texture).is_some());
        assert!(cache.get("Saturn", TextureLayer::Surface).is_none());
        assert_eq!(cache.len(), 2);

        let (_, misses) = cache.stats();
        for km in [58_232.0, 60_268.0, 1.0] {
            body.real_radius_km = Some(km);
            let again = BodyMaterials::resolve(&body, &synth, &mut cache, 1);
            assert_eq!(again, mats);
        }
        assert_eq!(cache.stats().1, misses, "clouds and ring must stay cached");
    }

    #[test]
    fn test_dropped_layers_are_evicted() {
        let synth = SurfaceSynthesizer::with_resolution(16);
        let mut cache = TextureCache::new();
        let mut body = saturn().with_clouds();
        BodyMaterials::resolve(&body, &synth, &mut cache, 1);
        assert_eq!(cache.len(), 3);

        body.clouds = false;
        body.ring = None;
        let mats = BodyMaterials::resolve(&body, &synth, &mut cache, 1);
        assert!(mats.clouds.is_none() && mats.ring.is_none());
        assert_eq!(cache.len(), 1);
        assert!(cache.get("Saturn", TextureLayer::Surface).is_some());
    }

    #[test]
    fn test_second_resolve_hits_cache() {
        let synth = SurfaceSynthesizer::with_resolution(16);
        let mut cache = TextureCache::new();
        let a = BodyMaterials::resolve(&saturn(), &synth, &mut cache, 1);
        let b = BodyMaterials::resolve(&saturn(), &synth, &mut cache, 1);
        let (ta, tb) = (a.surface.texture().unwrap(), b.surface.texture().unwrap());
        assert!(Arc::ptr_eq(ta, tb));
    }
}
