//! Per-archetype shading rules.
//!
//! Each rule maps one pixel, through fractal noise, to an opaque color. The
//! archetype is chosen from the body descriptor once, before synthesis, so
//! the per-pixel loop only dispatches over a closed enum.

use orrery_bodies::{BandPalette, BodyDescriptor, Rgb, SurfaceKind};
use orrery_noise::FractalSampler;

use crate::bitmap::rgba;

/// Pixels per noise lattice cell.
pub const NOISE_SCALE: f64 = 60.0;

/// A pixel position on a square bitmap of side `size`.
#[derive(Clone, Copy, Debug)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Pixel {
    pub fn new(x: u32, y: u32, size: u32) -> Self {
        Self {
            x: x as f64,
            y: y as f64,
            size: size as f64,
        }
    }

    /// Coordinates in noise space.
    pub fn noise_coords(&self) -> (f64, f64) {
        (self.x / NOISE_SCALE, self.y / NOISE_SCALE)
    }

    /// Horizontal position normalized to `[0, 1)`.
    pub fn u(&self) -> f64 {
        self.x / self.size
    }

    /// Vertical position normalized to `[0, 1)`.
    pub fn v(&self) -> f64 {
        self.y / self.size
    }

    /// Distance from the equator row, 0 at the middle and 1 at the poles.
    pub fn latitude(&self) -> f64 {
        (self.v() - 0.5).abs() * 2.0
    }
}

/// Oceans, continents and noise-modulated polar ice.
#[derive(Clone, Debug, PartialEq)]
pub struct OceanicRule {
    pub octaves: u32,
    /// Latitude above which ice forms, before noise modulation.
    pub polar_threshold: f64,
    /// How far noise shifts the ice line.
    pub polar_jitter: f64,
    /// Noise value above which a pixel is land.
    pub land_threshold: f64,
}

impl Default for OceanicRule {
    fn default() -> Self {
        Self {
            octaves: 8,
            polar_threshold: 0.88,
            polar_jitter: 0.05,
            land_threshold: 0.04,
        }
    }
}

impl OceanicRule {
    pub const ICE: [u8; 4] = [245, 245, 255, 255];

    pub fn shade(&self, fractal: &FractalSampler, px: Pixel) -> [u8; 4] {
        let (nx, ny) = px.noise_coords();
        let n = fractal.fbm(nx, ny, self.octaves);
        if px.latitude() > self.polar_threshold + n * self.polar_jitter {
            Self::ICE
        } else if n > self.land_threshold {
            rgba(40.0 + n * 60.0, 100.0 - n * 30.0, 60.0 - n * 30.0)
        } else {
            rgba(26.0 + n * 20.0, 95.0 + n * 40.0, 180.0 + n * 50.0)
        }
    }
}

/// Rust-red desert with fixed polar caps and darkened lowlands.
#[derive(Clone, Debug, PartialEq)]
pub struct AridRule {
    pub octaves: u32,
    pub polar_threshold: f64,
    /// Noise value below which the surface darkens.
    pub lowland_threshold: f64,
    /// Brightness multiplier applied in lowlands.
    pub lowland_shade: f64,
}

impl Default for AridRule {
    fn default() -> Self {
        Self {
            octaves: 6,
            polar_threshold: 0.94,
            lowland_threshold: -0.25,
            lowland_shade: 0.6,
        }
    }
}

impl AridRule {
    pub const CAP: [u8; 4] = [255, 245, 245, 255];

    pub fn shade(&self, fractal: &FractalSampler, px: Pixel) -> [u8; 4] {
        if px.latitude() > self.polar_threshold {
            return Self::CAP;
        }
        let (nx, ny) = px.noise_coords();
        let n = fractal.fbm(nx, ny, self.octaves);
        let mut base = 180.0 + n * 70.0;
        if n < self.lowland_threshold {
            base *= self.lowland_shade;
        }
        rgba(base, base * 0.45, base * 0.4)
    }
}

/// An elliptical storm oval in normalized bitmap coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Storm {
    pub center: (f64, f64),
    pub radii: (f64, f64),
    pub color: Rgb,
}

impl Storm {
    /// The large red oval in the southern hemisphere of a Jupiter-like giant.
    pub const GREAT_SPOT: Self = Self {
        center: (0.75, 0.65),
        radii: (0.1, 0.05),
        color: Rgb::new(180, 60, 50),
    };

    pub fn contains(&self, u: f64, v: f64) -> bool {
        let dx = (u - self.center.0) / self.radii.0;
        let dy = (v - self.center.1) / self.radii.1;
        dx * dx + dy * dy < 1.0
    }
}

/// Band color as `base + band_value * swing` per channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandColors {
    pub base: [f64; 3],
    pub swing: [f64; 3],
}

impl From<BandPalette> for BandColors {
    fn from(palette: BandPalette) -> Self {
        match palette {
            BandPalette::Ochre => Self {
                base: [200.0, 150.0, 110.0],
                swing: [30.0, 20.0, 15.0],
            },
            BandPalette::Pale => Self {
                base: [240.0, 215.0, 165.0],
                swing: [10.0, 8.0, 5.0],
            },
        }
    }
}

/// Latitude bands distorted by low-octave turbulence.
#[derive(Clone, Debug, PartialEq)]
pub struct BandedRule {
    pub bands: u32,
    pub colors: BandColors,
    pub storm: Option<Storm>,
    pub turbulence_octaves: u32,
    pub turbulence_strength: f64,
}

impl BandedRule {
    pub fn new(bands: u32, palette: BandPalette, storm: Option<Storm>) -> Self {
        Self {
            bands,
            colors: palette.into(),
            storm,
            turbulence_octaves: 2,
            turbulence_strength: 5.0,
        }
    }

    /// `sin(v * pi * bands + turbulence)`, in `[-1, 1]`.
    pub fn band_value(&self, fractal: &FractalSampler, px: Pixel) -> f64 {
        let (nx, ny) = px.noise_coords();
        let turbulence = fractal.fbm(nx, ny, self.turbulence_octaves) * self.turbulence_strength;
        (px.v() * std::f64::consts::PI * self.bands as f64 + turbulence).sin()
    }

    pub fn shade(&self, fractal: &FractalSampler, px: Pixel) -> [u8; 4] {
        if let Some(storm) = &self.storm
            && storm.contains(px.u(), px.v())
        {
            return storm.color.with_alpha(255);
        }
        let bv = self.band_value(fractal, px);
        let [br, bg, bb] = self.colors.base;
        let [sr, sg, sb] = self.colors.swing;
        rgba(br + bv * sr, bg + bv * sg, bb + bv * sb)
    }
}

/// The body's own color with low-octave variation.
#[derive(Clone, Debug, PartialEq)]
pub struct RockyRule {
    pub base: Rgb,
    pub octaves: u32,
    pub variation: f64,
}

impl RockyRule {
    pub fn new(base: Rgb) -> Self {
        Self {
            base,
            octaves: 4,
            variation: 30.0,
        }
    }

    pub fn shade(&self, fractal: &FractalSampler, px: Pixel) -> [u8; 4] {
        let (nx, ny) = px.noise_coords();
        let n = fractal.fbm(nx, ny, self.octaves) * self.variation;
        let [r, g, b] = self.base.to_f64();
        rgba(r + n, g + n, b + n)
    }
}

/// Warm granulation around the star's base color.
#[derive(Clone, Debug, PartialEq)]
pub struct StellarRule {
    pub base: Rgb,
    pub octaves: u32,
}

impl StellarRule {
    pub fn new(base: Rgb) -> Self {
        Self { base, octaves: 5 }
    }

    pub fn shade(&self, fractal: &FractalSampler, px: Pixel) -> [u8; 4] {
        let (nx, ny) = px.noise_coords();
        let n = fractal.fbm(nx, ny, self.octaves);
        let [r, g, b] = self.base.to_f64();
        // Hot cells shift toward yellow-white, cool lanes toward orange.
        rgba(r + n * 20.0 + 15.0, g + n * 45.0, b + n * 25.0)
    }
}

/// Closed set of surface shading rules.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceArchetype {
    Oceanic(OceanicRule),
    Arid(AridRule),
    Banded(BandedRule),
    Rocky(RockyRule),
    Stellar(StellarRule),
}

impl SurfaceArchetype {
    /// Select the rule for a body from its surface kind and base color.
    pub fn for_body(body: &BodyDescriptor) -> Self {
        match body.surface_kind() {
            SurfaceKind::Oceanic => Self::Oceanic(OceanicRule::default()),
            SurfaceKind::Arid => Self::Arid(AridRule::default()),
            SurfaceKind::Banded {
                bands,
                palette,
                storm,
            } => Self::Banded(BandedRule::new(
                bands,
                palette,
                storm.then_some(Storm::GREAT_SPOT),
            )),
            SurfaceKind::Rocky => Self::Rocky(RockyRule::new(body.color)),
            SurfaceKind::Stellar => Self::Stellar(StellarRule::new(body.color)),
        }
    }

    pub fn shade(&self, fractal: &FractalSampler, px: Pixel) -> [u8; 4] {
        match self {
            Self::Oceanic(rule) => rule.shade(fractal, px),
            Self::Arid(rule) => rule.shade(fractal, px),
            Self::Banded(rule) => rule.shade(fractal, px),
            Self::Rocky(rule) => rule.shade(fractal, px),
            Self::Stellar(rule) => rule.shade(fractal, px),
        }
    }

    /// Deepest fBm octave count the rule evaluates per pixel.
    pub fn octaves(&self) -> u32 {
        match self {
            Self::Oceanic(rule) => rule.octaves,
            Self::Arid(rule) => rule.octaves,
            Self::Banded(rule) => rule.turbulence_octaves,
            Self::Rocky(rule) => rule.octaves,
            Self::Stellar(rule) => rule.octaves,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Oceanic(_) => "oceanic",
            Self::Arid(_) => "arid",
            Self::Banded(_) => "banded",
            Self::Rocky(_) => "rocky",
            Self::Stellar(_) => "stellar",
        }
    }
}
