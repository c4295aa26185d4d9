//! Synthesized textures keyed by body and layer.
//!
//! An entry is reused until the inputs that produced it change. The
//! fingerprint covers everything synthesis reads, so a descriptor override
//! that alters appearance forces regeneration and one that does not is free.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use orrery_bodies::{BodyDescriptor, RingDescriptor};

use crate::{SynthesisError, SynthesisSettings, Texture};

/// Which bitmap of a body an entry holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureLayer {
    Surface,
    Clouds,
    Ring,
}

impl TextureLayer {
    /// Lowercase name, used in file names of dumped textures.
    pub fn name(self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Clouds => "clouds",
            Self::Ring => "ring",
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    fingerprint: u64,
    texture: Arc<Texture>,
}

/// Hash of the inputs that determine a body's bitmaps.
pub fn fingerprint(body: &BodyDescriptor, settings: &SynthesisSettings, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    settings.resolution.hash(&mut hasher);
    settings.cloud_resolution.hash(&mut hasher);
    settings.ring_width.hash(&mut hasher);
    body.surface_kind().hash(&mut hasher);
    body.color.hash(&mut hasher);
    body.clouds.hash(&mut hasher);
    if let Some(ring) = &body.ring {
        hash_ring(ring, &mut hasher);
    }
    hasher.finish()
}

fn hash_ring(ring: &RingDescriptor, hasher: &mut impl Hasher) {
    ring.color.hash(hasher);
    ring.has_gaps.hash(hasher);
}

/// Owned texture store. Textures are shared with the renderer through `Arc`.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<(String, TextureLayer), CacheEntry>,
    hits: u64,
    misses: u64,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached texture if its fingerprint matches, otherwise run
    /// `synthesize` and store the result. Failures are not cached.
    pub fn get_or_synthesize(
        &mut self,
        body: &str,
        layer: TextureLayer,
        fingerprint: u64,
        synthesize: impl FnOnce() -> Result<Texture, SynthesisError>,
    ) -> Result<Arc<Texture>, SynthesisError> {
        let key = (body.to_string(), layer);
        if let Some(entry) = self.entries.get(&key)
            && entry.fingerprint == fingerprint
        {
            self.hits += 1;
            return Ok(Arc::clone(&entry.texture));
        }

        self.misses += 1;
        let texture = Arc::new(synthesize()?);
        self.entries.insert(
            key,
            CacheEntry {
                fingerprint,
                texture: Arc::clone(&texture),
            },
        );
        Ok(texture)
    }

    pub fn get(&self, body: &str, layer: TextureLayer) -> Option<Arc<Texture>> {
        self.entries
            .get(&(body.to_string(), layer))
            .map(|entry| Arc::clone(&entry.texture))
    }

    /// Drop one layer of a body, leaving its other layers cached.
    pub fn invalidate_layer(&mut self, body: &str, layer: TextureLayer) {
        self.entries.remove(&(body.to_string(), layer));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_bodies::{BodyCategory, Rgb};

    fn solid() -> Result<Texture, SynthesisError> {
        Texture::from_fn(2, 2, |_, _| [1, 2, 3, 255])
    }

    #[test]
    fn test_hit_reuses_texture() {
        let mut cache = TextureCache::new();
        let a = cache.get_or_synthesize("Io", TextureLayer::Surface, 7, solid).unwrap();
        let b = cache
            .get_or_synthesize("Io", TextureLayer::Surface, 7, || {
                panic!("must not resynthesize on a hit")
            })
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_fingerprint_change_regenerates() {
        let mut cache = TextureCache::new();
        let a = cache.get_or_synthesize("Io", TextureLayer::Surface, 1, solid).unwrap();
        let b = cache.get_or_synthesize("Io", TextureLayer::Surface, 2, solid).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_not_cached() {
        let mut cache = TextureCache::new();
        let err = cache.get_or_synthesize("Io", TextureLayer::Clouds, 1, || {
            Err(SynthesisError::ZeroResolution)
        });
        assert!(err.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_layer_keeps_siblings() {
        let mut cache = TextureCache::new();
        cache.get_or_synthesize("Saturn", TextureLayer::Surface, 1, solid).unwrap();
        cache.get_or_synthesize("Saturn", TextureLayer::Ring, 1, solid).unwrap();
        cache.get_or_synthesize("Titan", TextureLayer::Surface, 1, solid).unwrap();
        cache.invalidate_layer("Saturn", TextureLayer::Surface);
        assert!(cache.get("Saturn", TextureLayer::Surface).is_none());
        assert!(cache.get("Saturn", TextureLayer::Ring).is_some());
        assert!(cache.get("Titan", TextureLayer::Surface).is_some());
    }

    #[test]
    fn test_fingerprint_tracks_appearance_only() {
        let settings = SynthesisSettings::default();
        let body = BodyDescriptor::new("Io", BodyCategory::Moon, 0.8, 13.0, 2.5, Rgb::WHITE);
        let base = fingerprint(&body, &settings, 1);

        let mut moved = body.clone();
        moved.distance = 99.0;
        assert_eq!(fingerprint(&moved, &settings, 1), base);

        let mut recolored = body.clone();
        recolored.color = Rgb::BLACK;
        assert_ne!(fingerprint(&recolored, &settings, 1), base);
        assert_ne!(fingerprint(&body, &settings, 2), base);
    }
}
