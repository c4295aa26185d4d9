//! Permutation-table gradient noise (improved Perlin) in two dimensions.

use noise::NoiseFn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of distinct lattice hashes before the table repeats.
const TABLE_SIZE: usize = 256;

/// Deterministic 2D gradient noise driven by a shuffled permutation table.
///
/// The table holds a 256-entry permutation followed by a copy of itself, so
/// the double lookup `perm[perm[x] + y + 1]` never needs an index wrap.
/// Once built the table is never mutated; two fields built from the same
/// seed sample identically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseField {
    perm: [u8; TABLE_SIZE * 2],
}

impl NoiseField {
    /// Build a field whose permutation is shuffled by a ChaCha8 stream seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::from_rng(&mut rng)
    }

    /// Build a field by Fisher–Yates shuffling the identity permutation with `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut base: [u8; TABLE_SIZE] = std::array::from_fn(|i| i as u8);
        for i in (1..TABLE_SIZE).rev() {
            let j = rng.random_range(0..=i);
            base.swap(i, j);
        }

        let mut perm = [0u8; TABLE_SIZE * 2];
        perm[..TABLE_SIZE].copy_from_slice(&base);
        perm[TABLE_SIZE..].copy_from_slice(&base);
        Self { perm }
    }

    /// The doubled permutation table.
    pub fn permutation(&self) -> &[u8; TABLE_SIZE * 2] {
        &self.perm
    }

    /// Sample the field at `(x, y)`. The result always lies in `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;

        let x = x - x_floor;
        let y = y - y_floor;
        let u = fade(x);
        let v = fade(y);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;
        let aa = p[a] as usize;
        let ab = p[a + 1] as usize;
        let ba = p[b] as usize;
        let bb = p[b + 1] as usize;

        let bottom = lerp(u, grad(p[aa], x, y), grad(p[ba], x - 1.0, y));
        let top = lerp(u, grad(p[ab], x, y - 1.0), grad(p[bb], x - 1.0, y - 1.0));
        lerp(v, bottom, top).clamp(-1.0, 1.0)
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Select one of the twelve-plus-four improved-Perlin gradients from the low
/// four bits of `hash` and dot it with the corner offset.
#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
