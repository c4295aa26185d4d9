//! Circular-orbit propagation over the body tree.
//!
//! Each registered body carries one angle. Per tick the angle advances by
//! `dt * speed * coefficient * damping` and the body's planar offset is
//! `(cos a * d, 0, sin a * d)` in its parent's frame. World positions are
//! composed top-down, relying on the tree's parent-before-child order.

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec3;
use orrery_bodies::{BodyId, BodyTree};
use rand::Rng;

/// Scale between a body's speed coefficient and its angular rate.
pub const DEFAULT_DAMPING: f64 = 0.1;

/// Per-body orbit state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    /// Orbit angle in radians, kept in `[0, 2pi)`.
    pub angle: f64,
    /// Offset from the parent in the orbital plane.
    pub local_offset: DVec3,
    /// Offset from the system origin.
    pub world_position: DVec3,
}

/// Wrap an angle into `[0, 2pi)`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Offset on a circle of radius `distance` in the XZ plane.
pub fn planar_offset(angle: f64, distance: f64) -> DVec3 {
    DVec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// Orbit angles for all registered bodies.
#[derive(Clone, Debug)]
pub struct OrbitPropagator {
    damping: f64,
    states: HashMap<BodyId, OrbitState>,
}

impl Default for OrbitPropagator {
    fn default() -> Self {
        Self::new(DEFAULT_DAMPING)
    }
}

impl OrbitPropagator {
    pub fn new(damping: f64) -> Self {
        Self {
            damping,
            states: HashMap::new(),
        }
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Start tracking `id` at `angle`. The root never orbits and always sits
    /// at the origin. Returns false if `id` is not in `tree`.
    pub fn register(&mut self, tree: &BodyTree, id: BodyId, angle: f64) -> bool {
        let Some(node) = tree.get(id) else {
            return false;
        };
        let (angle, local_offset) = if node.parent.is_none() {
            (0.0, DVec3::ZERO)
        } else {
            let angle = wrap_angle(angle);
            (angle, planar_offset(angle, node.descriptor.distance))
        };
        let world_position = node
            .parent
            .and_then(|p| self.world_position(p))
            .unwrap_or(DVec3::ZERO)
            + local_offset;
        self.states.insert(
            id,
            OrbitState {
                angle,
                local_offset,
                world_position,
            },
        );
        true
    }

    /// Register every body of `tree` with a random starting angle drawn from
    /// `rng`, so orbits do not start aligned.
    pub fn register_tree<R: Rng + ?Sized>(&mut self, tree: &BodyTree, rng: &mut R) {
        for id in tree.ids() {
            let angle = rng.random::<f64>() * TAU;
            self.register(tree, id, angle);
        }
        log::debug!("Registered {} orbits", self.states.len());
    }

    /// Stop tracking `id` and all of its descendants.
    pub fn deregister(&mut self, tree: &BodyTree, id: BodyId) -> Option<OrbitState> {
        let removed = self.states.remove(&id);
        for &child in tree.children(id) {
            self.deregister(tree, child);
        }
        removed
    }

    /// Advance one body's angle and return its new offset from its parent.
    ///
    /// The root is left untouched and reports a zero offset. `None` if the
    /// body is not registered. A zero `dt` or zero `speed` leaves the angle
    /// bit-for-bit unchanged.
    pub fn advance(&mut self, tree: &BodyTree, id: BodyId, dt: f64, speed: f64) -> Option<DVec3> {
        let node = tree.get(id)?;
        let damping = self.damping;
        let state = self.states.get_mut(&id)?;
        if node.parent.is_none() {
            return Some(DVec3::ZERO);
        }

        let delta = dt * speed * node.descriptor.speed * damping;
        if delta != 0.0 && delta.is_finite() {
            state.angle = wrap_angle(state.angle + delta);
        }
        state.local_offset = planar_offset(state.angle, node.descriptor.distance);
        Some(state.local_offset)
    }

    /// Advance every registered body and recompose world positions, parents
    /// first.
    pub fn tick(&mut self, tree: &BodyTree, dt: f64, speed: f64) {
        for (id, node) in tree.iter() {
            let Some(local) = self.advance(tree, id, dt, speed) else {
                continue;
            };
            let parent_world = node
                .parent
                .and_then(|p| self.world_position(p))
                .unwrap_or(DVec3::ZERO);
            if let Some(state) = self.states.get_mut(&id) {
                state.world_position = parent_world + local;
            }
        }
    }

    pub fn state(&self, id: BodyId) -> Option<&OrbitState> {
        self.states.get(&id)
    }

    pub fn angle(&self, id: BodyId) -> Option<f64> {
        self.states.get(&id).map(|s| s.angle)
    }

    pub fn local_offset(&self, id: BodyId) -> Option<DVec3> {
        self.states.get(&id).map(|s| s.local_offset)
    }

    /// Position relative to the system origin as of the last tick.
    pub fn world_position(&self, id: BodyId) -> Option<DVec3> {
        self.states.get(&id).map(|s| s.world_position)
    }

    pub fn is_registered(&self, id: BodyId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
