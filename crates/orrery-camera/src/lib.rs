//! Camera that follows a focused body or relaxes back to the system origin.

mod tracker;

pub use tracker::{
    CameraMode, CameraState, CameraTick, CameraTracker, Located, Standoff, TrackerParams,
    WorldLookup,
};
