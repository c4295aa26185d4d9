//! Orbital kinematics: circular orbits over the body tree, axial spin, the
//! asteroid belt and orbit guides.

mod belt;
mod path;
mod propagator;
mod spin;

pub use belt::{Asteroid, AsteroidBelt, BELT_REFERENCE_FPS, BeltParams};
pub use path::{GUIDE_SEGMENTS, OrbitGuide, orbit_guides};
pub use propagator::{DEFAULT_DAMPING, OrbitPropagator, OrbitState, planar_offset, wrap_angle};
pub use spin::{AxialSpin, SpinRates, SpinTracker};
