//! Static body descriptors: the immutable input to registration.

use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Broad classification of a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyCategory {
    Star,
    Planet,
    Dwarf,
    Asteroid,
    Moon,
}

/// Palette used by banded gas-giant surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandPalette {
    /// Warm ochre and rust bands.
    Ochre,
    /// Pale cream bands with low contrast.
    Pale,
}

/// Which procedural surface rule a body is painted with.
///
/// Absent from a descriptor, the rule follows from the category: stars are
/// [`SurfaceKind::Stellar`], everything else [`SurfaceKind::Rocky`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Oceans, continents and polar ice.
    Oceanic,
    /// Rust-colored desert with polar caps and dark lowlands.
    Arid,
    /// Latitude bands with turbulence and an optional storm oval.
    Banded {
        bands: u32,
        palette: BandPalette,
        storm: bool,
    },
    /// The body's base color with low-octave variation.
    Rocky,
    /// Self-illuminated warm granulation.
    Stellar,
}

/// Planetary ring geometry and appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingDescriptor {
    /// Inner radius in visual units. Must be positive.
    pub inner_radius: f64,
    /// Outer radius in visual units. Must exceed `inner_radius`.
    pub outer_radius: f64,
    /// Solid tint. `None` selects the default translucent white gradient.
    #[serde(default)]
    pub color: Option<Rgb>,
    /// Ring plane orientation as XYZ Euler angles in radians.
    #[serde(default)]
    pub tilt: [f64; 3],
    /// Carve dark division bands into the gradient.
    #[serde(default)]
    pub has_gaps: bool,
}

impl RingDescriptor {
    /// Radial extent of the ring.
    pub fn width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// Rim-glow parameters for a body with a visible atmosphere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Atmosphere {
    pub color: Rgb,
    /// Shell radius as a multiple of the body radius.
    pub scale: f64,
    /// Bias added to the view-normal dot product.
    pub coefficient: f64,
    /// Falloff exponent.
    pub power: f64,
}

impl Atmosphere {
    /// Glow intensity for a surface whose normal makes `n_dot_v` with the view direction.
    pub fn intensity(&self, n_dot_v: f64) -> f64 {
        (self.coefficient + n_dot_v).max(0.0).powf(self.power)
    }

    /// Radius of the atmosphere shell around a body of `body_radius`.
    pub fn shell_radius(&self, body_radius: f64) -> f64 {
        body_radius * self.scale
    }
}

/// Documentary facts shown by an info panel. None of them affect the simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDetails {
    pub description: Option<String>,
    pub mass: Option<String>,
    pub gravity: Option<String>,
    pub rotation_period: Option<String>,
    pub orbital_period: Option<String>,
    pub temperature: Option<String>,
    pub composition: Vec<String>,
    pub facts: Vec<String>,
}

/// Static description of one body and, recursively, its satellites.
///
/// Visual attributes (`radius`, `distance`) drive rendering and motion; the
/// `real_*` attributes are independent documentary values with no fixed
/// scale relation to them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Identity. Unique within a system.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub category: BodyCategory,
    /// Visual radius.
    pub radius: f64,
    /// Physical radius in kilometres.
    #[serde(default)]
    pub real_radius_km: Option<f64>,
    /// Visual orbital distance from the parent. Zero only for the root star.
    #[serde(default)]
    pub distance: f64,
    /// Physical distance as free text (e.g. "149.6 million km").
    #[serde(default)]
    pub real_distance: Option<String>,
    /// Angular speed coefficient. Negative is retrograde; zero is allowed.
    #[serde(default)]
    pub speed: f64,
    pub color: Rgb,
    #[serde(default)]
    pub surface: Option<SurfaceKind>,
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
    #[serde(default)]
    pub atmosphere: Option<Atmosphere>,
    /// Whether a translucent cloud layer is synthesized for this body.
    #[serde(default)]
    pub clouds: bool,
    /// External texture reference that replaces procedural synthesis.
    #[serde(default)]
    pub texture_override: Option<String>,
    #[serde(default)]
    pub details: BodyDetails,
    #[serde(default, alias = "moons")]
    pub satellites: Vec<BodyDescriptor>,
}

impl BodyDescriptor {
    /// A minimal descriptor; optional attributes start empty.
    pub fn new(
        name: impl Into<String>,
        category: BodyCategory,
        radius: f64,
        distance: f64,
        speed: f64,
        color: Rgb,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            category,
            radius,
            real_radius_km: None,
            distance,
            real_distance: None,
            speed,
            color,
            surface: None,
            ring: None,
            atmosphere: None,
            clouds: false,
            texture_override: None,
            details: BodyDetails::default(),
            satellites: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_real_radius(mut self, km: f64) -> Self {
        self.real_radius_km = Some(km);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_ring(mut self, ring: RingDescriptor) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn with_atmosphere(mut self, atmosphere: Atmosphere) -> Self {
        self.atmosphere = Some(atmosphere);
        self
    }

    pub fn with_clouds(mut self) -> Self {
        self.clouds = true;
        self
    }

    pub fn with_satellite(mut self, satellite: BodyDescriptor) -> Self {
        self.satellites.push(satellite);
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.details.description = Some(text.into());
        self
    }

    /// The name to show to users, falling back to the identity.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// The effective surface rule.
    pub fn surface_kind(&self) -> SurfaceKind {
        self.surface.unwrap_or(match self.category {
            BodyCategory::Star => SurfaceKind::Stellar,
            _ => SurfaceKind::Rocky,
        })
    }

    /// Self-illuminated bodies are not shaded by the renderer.
    pub fn is_emissive(&self) -> bool {
        self.category == BodyCategory::Star
    }

    /// Total number of bodies in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.satellites.iter().map(Self::subtree_len).sum::<usize>()
    }
}
