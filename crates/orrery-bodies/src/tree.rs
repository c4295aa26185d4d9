//! Arena-backed body tree.
//!
//! The nested descriptor is flattened in pre-order, so every parent's index
//! is lower than any of its descendants'. Walking the arena front to back is
//! therefore a valid parent-before-child traversal.

use std::collections::HashMap;

use crate::{BodyDescriptor, BodyError};

/// Index of a body in its [`BodyTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One body record. `descriptor.satellites` is always empty here; the
/// hierarchy lives in `parent` and `children`.
#[derive(Clone, Debug)]
pub struct BodyNode {
    pub descriptor: BodyDescriptor,
    pub parent: Option<BodyId>,
    pub children: Vec<BodyId>,
    /// Zero for the root, one for planets, two for their moons.
    pub depth: u32,
}

/// A validated star system: one root star and its satellites, recursively.
#[derive(Clone, Debug)]
pub struct BodyTree {
    nodes: Vec<BodyNode>,
    name_index: HashMap<String, BodyId>,
}

impl BodyTree {
    /// Validate and flatten a descriptor tree rooted at the star.
    ///
    /// # Errors
    ///
    /// Fails on the first body with a non-positive or non-finite radius, a
    /// satellite with a non-positive distance, a root that is not at the
    /// origin, a non-finite speed, malformed ring radii, or a repeated name.
    pub fn build(root: BodyDescriptor) -> Result<Self, BodyError> {
        let mut tree = Self {
            nodes: Vec::with_capacity(root.subtree_len()),
            name_index: HashMap::new(),
        };
        tree.insert(root, None, 0)?;
        log::debug!("Built body tree with {} bodies", tree.len());
        Ok(tree)
    }

    fn insert(
        &mut self,
        mut descriptor: BodyDescriptor,
        parent: Option<BodyId>,
        depth: u32,
    ) -> Result<BodyId, BodyError> {
        validate(&descriptor, parent.is_none())?;
        if self.name_index.contains_key(&descriptor.name) {
            return Err(BodyError::DuplicateName(descriptor.name));
        }

        let id = BodyId(self.nodes.len() as u32);
        let satellites = std::mem::take(&mut descriptor.satellites);
        self.name_index.insert(descriptor.name.clone(), id);
        self.nodes.push(BodyNode {
            descriptor,
            parent,
            children: Vec::with_capacity(satellites.len()),
            depth,
        });

        for satellite in satellites {
            let child = self.insert(satellite, Some(id), depth + 1)?;
            self.nodes[id.index()].children.push(child);
        }
        Ok(id)
    }

    /// The star at the root of the system.
    pub fn root(&self) -> BodyId {
        BodyId(0)
    }

    pub fn get(&self, id: BodyId) -> Option<&BodyNode> {
        self.nodes.get(id.index())
    }

    pub fn descriptor(&self, id: BodyId) -> Option<&BodyDescriptor> {
        self.get(id).map(|node| &node.descriptor)
    }

    /// Mutable access for appearance overrides. Callers must not change
    /// `radius` or `distance` through this; use [`BodyTree::set_geometry`].
    pub fn descriptor_mut(&mut self, id: BodyId) -> Option<&mut BodyDescriptor> {
        self.nodes.get_mut(id.index()).map(|node| &mut node.descriptor)
    }

    /// Replace a body's visual radius and orbital distance, re-validating them.
    pub fn set_geometry(&mut self, id: BodyId, radius: f64, distance: f64) -> Result<(), BodyError> {
        let Some(node) = self.nodes.get_mut(id.index()) else {
            return Err(BodyError::UnknownId(id.0));
        };
        let mut candidate = node.descriptor.clone();
        candidate.radius = radius;
        candidate.distance = distance;
        validate(&candidate, node.parent.is_none())?;
        node.descriptor = candidate;
        Ok(())
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: BodyId) -> &[BodyId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Look up a body by identity name.
    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.name_index.get(name).copied()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All bodies, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &BodyNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (BodyId(i as u32), node))
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.nodes.len() as u32).map(BodyId)
    }

    /// Chain of ancestors from `id`'s parent up to the root.
    pub fn ancestors(&self, id: BodyId) -> impl Iterator<Item = BodyId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }
}

fn validate(descriptor: &BodyDescriptor, is_root: bool) -> Result<(), BodyError> {
    let degenerate = |field: &'static str, value: f64| BodyError::DegenerateGeometry {
        body: descriptor.name.clone(),
        field,
        value,
    };

    if !descriptor.radius.is_finite() || descriptor.radius <= 0.0 {
        return Err(degenerate("radius", descriptor.radius));
    }
    if is_root {
        if descriptor.distance != 0.0 {
            return Err(BodyError::RootOrbit {
                body: descriptor.name.clone(),
                distance: descriptor.distance,
            });
        }
    } else if !descriptor.distance.is_finite() || descriptor.distance <= 0.0 {
        return Err(degenerate("distance", descriptor.distance));
    }
    if !descriptor.speed.is_finite() {
        return Err(degenerate("speed", descriptor.speed));
    }
    if let Some(real) = descriptor.real_radius_km
        && (!real.is_finite() || real <= 0.0)
    {
        return Err(degenerate("real_radius_km", real));
    }
    if let Some(ring) = &descriptor.ring
        && !(ring.inner_radius > 0.0
            && ring.outer_radius.is_finite()
            && ring.outer_radius > ring.inner_radius)
    {
        return Err(BodyError::InvalidRing {
            body: descriptor.name.clone(),
            inner: ring.inner_radius,
            outer: ring.outer_radius,
        });
    }
    Ok(())
}
