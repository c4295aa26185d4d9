//! Scene composition for the orrery.
//!
//! [`Scene`] owns one validated star system and everything derived from
//! it: textures, orbit and spin state, the asteroid belt, orbit guides and
//! the camera. A host calls [`Scene::tick`] once per step, usually through
//! [`FrameClock`], and reads transforms and the camera pose back out.

mod clock;
mod error;
mod scene;
mod seed;
mod settings;

pub use clock::{FIXED_DT, FrameClock, MAX_FRAME_TIME};
pub use error::SceneError;
pub use scene::{BodyTransform, CameraPose, Scene};
pub use seed::SeedPolicy;
pub use settings::SceneSettings;
