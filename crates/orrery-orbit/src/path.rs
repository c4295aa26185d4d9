//! Orbit guide polylines for the renderer's faint orbit rings.

use std::f64::consts::TAU;

use glam::DVec3;
use orrery_bodies::{BodyId, BodyTree};

use crate::planar_offset;

/// Segments per guide loop.
pub const GUIDE_SEGMENTS: usize = 128;

/// A closed loop at a body's orbital distance, in its parent's frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitGuide {
    pub body: BodyId,
    pub parent: BodyId,
    pub radius: f64,
    /// `segments` points; the last connects back to the first.
    pub points: Vec<DVec3>,
}

impl OrbitGuide {
    pub fn new(body: BodyId, parent: BodyId, radius: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..segments)
            .map(|i| planar_offset(TAU * i as f64 / segments as f64, radius))
            .collect();
        Self {
            body,
            parent,
            radius,
            points,
        }
    }

    /// The loop translated to `parent_position`.
    pub fn world_points(&self, parent_position: DVec3) -> impl Iterator<Item = DVec3> + '_ {
        self.points.iter().map(move |p| *p + parent_position)
    }
}

/// One guide per orbiting body.
pub fn orbit_guides(tree: &BodyTree, segments: usize) -> Vec<OrbitGuide> {
    tree.iter()
        .filter_map(|(id, node)| {
            node.parent
                .map(|parent| OrbitGuide::new(id, parent, node.descriptor.distance, segments))
        })
        .collect()
}
