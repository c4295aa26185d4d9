//! Instanced asteroid belt between the inner and outer planets.

use std::f64::consts::TAU;

use glam::{DMat4, DQuat, DVec3, EulerRot};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::wrap_angle;

/// Belt rotation is specified per frame at this rate.
pub const BELT_REFERENCE_FPS: f64 = 60.0;

/// Shape and motion of the belt.
#[derive(Clone, Debug, PartialEq)]
pub struct BeltParams {
    pub count: u32,
    pub inner_radius: f64,
    /// Radial thickness of the annulus.
    pub width: f64,
    /// Total vertical spread, centered on the orbital plane.
    pub vertical_spread: f64,
    pub min_scale: f64,
    pub scale_range: f64,
    /// Belt yaw per reference frame, in radians.
    pub spin_rate: f64,
}

impl Default for BeltParams {
    fn default() -> Self {
        Self {
            count: 3000,
            inner_radius: 75.0,
            width: 10.0,
            vertical_spread: 2.0,
            min_scale: 0.1,
            scale_range: 0.2,
            spin_rate: 0.0002,
        }
    }
}

/// One rock, in belt-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    pub position: DVec3,
    /// XYZ Euler angles in radians.
    pub rotation: DVec3,
    pub scale: f64,
}

impl Asteroid {
    pub fn local_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(
            DVec3::splat(self.scale),
            DQuat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }
}

/// A deterministic field of rocks on an annulus that turns slowly about Y.
#[derive(Clone, Debug)]
pub struct AsteroidBelt {
    params: BeltParams,
    rocks: Vec<Asteroid>,
    yaw: f64,
}

impl AsteroidBelt {
    /// Scatter `params.count` rocks using `seed`. The same seed always
    /// produces the same belt.
    pub fn generate(params: BeltParams, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut rocks = Vec::with_capacity(params.count as usize);

        for _ in 0..params.count {
            let angle = rng.random::<f64>() * TAU;
            let r = params.inner_radius + rng.random::<f64>() * params.width;
            let y = (rng.random::<f64>() - 0.5) * params.vertical_spread;
            let rotation = DVec3::new(rng.random(), rng.random(), rng.random());
            let scale = params.min_scale + rng.random::<f64>() * params.scale_range;
            rocks.push(Asteroid {
                position: DVec3::new(angle.cos() * r, y, angle.sin() * r),
                rotation,
                scale,
            });
        }

        log::debug!("Generated asteroid belt with {} rocks", rocks.len());
        Self {
            params,
            rocks,
            yaw: 0.0,
        }
    }

    /// Turn the belt by `dt` seconds worth of reference frames. The belt
    /// drifts regardless of the global speed, as a backdrop.
    pub fn tick(&mut self, dt: f64) {
        if dt.is_finite() {
            self.yaw = wrap_angle(self.yaw + self.params.spin_rate * dt * BELT_REFERENCE_FPS);
        }
    }

    pub fn rocks(&self) -> &[Asteroid] {
        &self.rocks
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn params(&self) -> &BeltParams {
        &self.params
    }

    /// World-space matrix of every rock at the current belt yaw.
    pub fn instance_matrices(&self) -> Vec<DMat4> {
        let belt = DMat4::from_rotation_y(self.yaw);
        self.rocks.iter().map(|rock| belt * rock.local_matrix()).collect()
    }
}
