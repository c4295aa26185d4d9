//! The composition point: one star system with its textures, orbits,
//! spins, belt and camera, stepped once per frame.

use std::sync::Arc;

use glam::{DQuat, DVec3};
use orrery_bodies::{BodyDescriptor, BodyError, BodyId, BodyTree};
use orrery_camera::{CameraTick, CameraTracker, Located, WorldLookup};
use orrery_noise::{derive_seed, seeded_rng};
use orrery_orbit::{AsteroidBelt, OrbitGuide, OrbitPropagator, SpinTracker, orbit_guides};
use orrery_surface::{BodyMaterials, SurfaceSynthesizer, Texture, TextureCache, TextureLayer};
use tracing::{debug, info, warn};

use crate::{SceneError, SceneSettings};

/// Where a body is and how it is turned, for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyTransform {
    pub position: DVec3,
    pub rotation: DQuat,
    pub cloud_rotation: DQuat,
    /// Visual radius; the renderer scales a unit sphere by it.
    pub radius: f64,
}

/// Camera output for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: DVec3,
    pub target: DVec3,
    pub rotation: DQuat,
    pub focus: Option<BodyId>,
}

struct SceneLookup<'a> {
    tree: &'a BodyTree,
    orbits: &'a OrbitPropagator,
}

impl WorldLookup for SceneLookup<'_> {
    fn locate(&self, id: BodyId) -> Option<Located> {
        let radius = self.tree.descriptor(id)?.radius;
        let position = self.orbits.world_position(id)?;
        Some(Located { position, radius })
    }
}

pub struct Scene {
    seed: u64,
    speed: f64,
    tree: BodyTree,
    orbits: OrbitPropagator,
    spins: SpinTracker,
    camera: CameraTracker,
    belt: Option<AsteroidBelt>,
    guides: Vec<OrbitGuide>,
    guide_segments: usize,
    synth: SurfaceSynthesizer,
    cache: TextureCache,
    /// Indexed by `BodyId`.
    materials: Vec<BodyMaterials>,
}

impl Scene {
    /// Validate the body tree, synthesize every texture and register every
    /// orbit. Fails before any per-frame state exists if the tree is invalid.
    pub fn build(root: BodyDescriptor, settings: SceneSettings) -> Result<Self, SceneError> {
        let tree = BodyTree::build(root)?;
        let seed = settings.seed.resolve();

        let mut orbits = OrbitPropagator::new(settings.damping);
        orbits.register_tree(&tree, &mut seeded_rng(seed, "orbits"));

        let mut spins = SpinTracker::new(settings.spin);
        spins.register_tree(&tree);

        let synth = SurfaceSynthesizer::new(settings.synthesis);
        let mut cache = TextureCache::new();
        let materials: Vec<BodyMaterials> = tree
            .iter()
            .map(|(_, node)| {
                let body = &node.descriptor;
                BodyMaterials::resolve(body, &synth, &mut cache, derive_seed(seed, &body.name))
            })
            .collect();

        let belt = settings
            .belt
            .map(|params| AsteroidBelt::generate(params, derive_seed(seed, "belt")));
        let guides = orbit_guides(&tree, settings.guide_segments);

        let fallbacks = materials.iter().filter(|m| m.synthesis_failed()).count();
        info!(
            "Scene registered: {} bodies, {} textures, {} fallbacks, {} asteroids, seed {seed}",
            tree.len(),
            cache.len(),
            fallbacks,
            belt.as_ref().map_or(0, |b| b.rocks().len()),
        );

        Ok(Self {
            seed,
            speed: settings.initial_speed,
            tree,
            orbits,
            spins,
            camera: CameraTracker::new(settings.camera),
            belt,
            guides,
            guide_segments: settings.guide_segments,
            synth,
            cache,
            materials,
        })
    }

    /// One frame: orbits, spins, belt, then the camera.
    pub fn tick(&mut self, dt: f64) -> CameraTick {
        self.orbits.tick(&self.tree, dt, self.speed);
        self.spins.tick(dt, self.speed);
        if let Some(belt) = &mut self.belt {
            belt.tick(dt);
        }
        let lookup = SceneLookup {
            tree: &self.tree,
            orbits: &self.orbits,
        };
        self.camera.tick(&lookup)
    }

    /// Global speed multiplier. Zero pauses, negative runs orbits backwards
    /// and stops spin. NaN is ignored.
    pub fn set_speed(&mut self, speed: f64) {
        if speed.is_nan() {
            warn!("Ignoring NaN speed");
            return;
        }
        debug!("Speed {} -> {speed}", self.speed);
        self.speed = speed;
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Lock the camera on a body, or release it with `None`.
    pub fn select(&mut self, focus: Option<BodyId>) {
        match focus.and_then(|id| self.tree.descriptor(id)) {
            Some(body) => info!("Focus: {}", body.name),
            None if focus.is_some() => {
                warn!("Focus on unregistered body {focus:?}; camera will hold")
            }
            None => info!("Focus cleared"),
        }
        self.camera.select(focus);
    }

    /// [`Scene::select`] by body name.
    pub fn select_by_name(&mut self, name: Option<&str>) -> Result<Option<BodyId>, SceneError> {
        let focus = name.map(|n| self.id_of(n)).transpose()?;
        self.select(focus);
        Ok(focus)
    }

    pub fn id_of(&self, name: &str) -> Result<BodyId, SceneError> {
        self.tree
            .id_of(name)
            .ok_or_else(|| SceneError::UnknownBody(name.to_string()))
    }

    /// Edit a body's descriptor in place and re-synthesize what changed.
    ///
    /// Geometry is re-validated; on failure the body is left as it was. The
    /// name and satellites cannot change. Returns whether any material
    /// changed.
    pub fn update_body(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut BodyDescriptor),
    ) -> Result<bool, SceneError> {
        let id = self.id_of(name)?;
        let current = self
            .tree
            .descriptor(id)
            .ok_or(BodyError::UnknownId(id.0))?;
        let mut candidate = current.clone();
        edit(&mut candidate);

        if candidate.name != current.name {
            return Err(SceneError::StructuralChange {
                body: current.name.clone(),
                field: "name",
            });
        }
        if !candidate.satellites.is_empty() {
            return Err(SceneError::StructuralChange {
                body: current.name.clone(),
                field: "satellites",
            });
        }
        let geometry_changed =
            candidate.radius != current.radius || candidate.distance != current.distance;
        let (radius, distance) = (candidate.radius, candidate.distance);

        let slot = self
            .tree
            .descriptor_mut(id)
            .ok_or(BodyError::UnknownId(id.0))?;
        let previous = std::mem::replace(slot, candidate);
        if let Err(err) = self.tree.set_geometry(id, radius, distance) {
            if let Some(slot) = self.tree.descriptor_mut(id) {
                *slot = previous;
            }
            return Err(err.into());
        }

        if geometry_changed {
            self.orbits.tick(&self.tree, 0.0, 0.0);
            self.guides = orbit_guides(&self.tree, self.guide_segments);
        }

        let changed = self.resolve_materials(id);
        if changed {
            info!("Re-synthesized materials for {name}");
        }
        Ok(changed)
    }

    /// Point a body at an external texture, or back to synthesis with `None`.
    pub fn set_texture_override(
        &mut self,
        name: &str,
        reference: Option<String>,
    ) -> Result<bool, SceneError> {
        self.update_body(name, |body| body.texture_override = reference)
    }

    fn resolve_materials(&mut self, id: BodyId) -> bool {
        let Some(body) = self.tree.descriptor(id) else {
            return false;
        };
        let resolved = BodyMaterials::resolve(
            body,
            &self.synth,
            &mut self.cache,
            derive_seed(self.seed, &body.name),
        );
        match self.materials.get_mut(id.index()) {
            Some(slot) if *slot != resolved => {
                *slot = resolved;
                true
            }
            _ => false,
        }
    }

    pub fn camera_pose(&self) -> CameraPose {
        let state = self.camera.state();
        CameraPose {
            eye: state.eye,
            target: state.target,
            rotation: self.camera.look_rotation(),
            focus: state.focus(),
        }
    }

    /// User camera controls act here between ticks.
    pub fn camera_mut(&mut self) -> &mut CameraTracker {
        &mut self.camera
    }

    pub fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    pub fn body_transform(&self, id: BodyId) -> Option<BodyTransform> {
        let radius = self.tree.descriptor(id)?.radius;
        let position = self.orbits.world_position(id)?;
        let spin = self.spins.get(id).copied().unwrap_or_default();
        Some(BodyTransform {
            position,
            rotation: spin.rotation(),
            cloud_rotation: spin.cloud_rotation(),
            radius,
        })
    }

    pub fn materials(&self, id: BodyId) -> Option<&BodyMaterials> {
        self.materials.get(id.index())
    }

    /// Every synthesized bitmap with its body name and layer.
    pub fn textures(&self) -> impl Iterator<Item = (&str, TextureLayer, &Arc<Texture>)> {
        self.tree.iter().flat_map(move |(id, node)| {
            self.materials(id).into_iter().flat_map(move |materials| {
                materials.layers().filter_map(move |(layer, material)| {
                    material
                        .texture()
                        .map(|texture| (node.descriptor.name.as_str(), layer, texture))
                })
            })
        })
    }

    /// (hits, misses) of the texture cache.
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    pub fn tree(&self) -> &BodyTree {
        &self.tree
    }

    pub fn orbits(&self) -> &OrbitPropagator {
        &self.orbits
    }

    pub fn guides(&self) -> &[OrbitGuide] {
        &self.guides
    }

    pub fn belt(&self) -> Option<&AsteroidBelt> {
        self.belt.as_ref()
    }
}
