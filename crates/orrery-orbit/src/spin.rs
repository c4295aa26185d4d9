//! Axial rotation of bodies and their cloud layers.
//!
//! Spin runs at a fixed rate per second and only while the global speed is
//! positive. It is not scaled by the speed itself.

use std::collections::HashMap;

use glam::{DQuat, EulerRot};
use orrery_bodies::{BodyId, BodyTree};

use crate::wrap_angle;

/// Angular rates in radians per second.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinRates {
    pub body: f64,
    pub cloud_yaw: f64,
    pub cloud_pitch: f64,
}

impl Default for SpinRates {
    fn default() -> Self {
        Self {
            body: 0.05,
            cloud_yaw: 0.07,
            cloud_pitch: 0.02,
        }
    }
}

/// Current spin of one body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxialSpin {
    pub yaw: f64,
    pub cloud_yaw: f64,
    pub cloud_pitch: f64,
}

impl AxialSpin {
    pub fn rotation(&self) -> DQuat {
        DQuat::from_rotation_y(self.yaw)
    }

    pub fn cloud_rotation(&self) -> DQuat {
        DQuat::from_euler(EulerRot::XYZ, self.cloud_pitch, self.cloud_yaw, 0.0)
    }
}

/// Spin state for every body in a tree.
#[derive(Clone, Debug, Default)]
pub struct SpinTracker {
    rates: SpinRates,
    spins: HashMap<BodyId, AxialSpin>,
}

impl SpinTracker {
    pub fn new(rates: SpinRates) -> Self {
        Self {
            rates,
            spins: HashMap::new(),
        }
    }

    pub fn register_tree(&mut self, tree: &BodyTree) {
        for id in tree.ids() {
            self.spins.entry(id).or_default();
        }
    }

    pub fn deregister(&mut self, id: BodyId) {
        self.spins.remove(&id);
    }

    /// Advance every spin by `dt` unless `speed` is zero or negative.
    pub fn tick(&mut self, dt: f64, speed: f64) {
        if speed.is_nan() || speed <= 0.0 || !dt.is_finite() {
            return;
        }
        for spin in self.spins.values_mut() {
            spin.yaw = wrap_angle(spin.yaw + self.rates.body * dt);
            spin.cloud_yaw = wrap_angle(spin.cloud_yaw + self.rates.cloud_yaw * dt);
            spin.cloud_pitch = wrap_angle(spin.cloud_pitch + self.rates.cloud_pitch * dt);
        }
    }

    pub fn get(&self, id: BodyId) -> Option<&AxialSpin> {
        self.spins.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_bodies::{BodyCategory, BodyDescriptor, Rgb};

    fn tree() -> BodyTree {
        let star = BodyDescriptor::new("Sun", BodyCategory::Star, 12.0, 0.0, 0.0, Rgb::WHITE);
        let planet = BodyDescriptor::new("Earth", BodyCategory::Planet, 4.0, 45.0, 1.0, Rgb::WHITE);
        BodyTree::build(star.with_satellite(planet)).unwrap()
    }

    #[test]
    fn test_spin_advances_at_fixed_rate() {
        let tree = tree();
        let mut spins = SpinTracker::default();
        spins.register_tree(&tree);
        spins.tick(2.0, 10.0);
        let earth = spins.get(tree.id_of("Earth").unwrap()).unwrap();
        assert!((earth.yaw - 0.1).abs() < 1e-12, "speed must not scale spin");
        assert!((earth.cloud_yaw - 0.14).abs() < 1e-12);
        assert!((earth.cloud_pitch - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_spin_stops_when_paused_or_reversed() {
        let tree = tree();
        let mut spins = SpinTracker::default();
        spins.register_tree(&tree);
        spins.tick(1.0, 0.0);
        spins.tick(1.0, -2.0);
        let earth = spins.get(tree.id_of("Earth").unwrap()).unwrap();
        assert_eq!(*earth, AxialSpin::default());
    }

    #[test]
    fn test_deregistered_body_stops_spinning() {
        let tree = tree();
        let earth = tree.id_of("Earth").unwrap();
        let mut spins = SpinTracker::default();
        spins.register_tree(&tree);
        spins.deregister(earth);
        spins.tick(1.0, 1.0);
        assert!(spins.get(earth).is_none());
        assert!(spins.get(tree.root()).is_some_and(|sun| sun.yaw > 0.0));
    }

    #[test]
    fn test_rotation_is_about_y() {
        let spin = AxialSpin {
            yaw: std::f64::consts::FRAC_PI_2,
            ..AxialSpin::default()
        };
        let x = spin.rotation() * glam::DVec3::X;
        assert!((x - glam::DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }
}
