//! Focus-following camera.
//!
//! Two modes. **Idle** relaxes the look-at target toward the system origin
//! and leaves the eye to the user. **Locked** smooths the target onto the
//! focused body and pulls the eye to a stand-off point along the current
//! view ray, so the user's viewing angle survives the follow.

use glam::{DMat3, DQuat, DVec3};
use orrery_bodies::BodyId;

/// Where a body is this frame and how large it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Located {
    pub position: DVec3,
    pub radius: f64,
}

/// Read-only access to the current world transforms.
pub trait WorldLookup {
    /// `None` when the body has no transform yet.
    fn locate(&self, id: BodyId) -> Option<Located>;
}

impl<F> WorldLookup for F
where
    F: Fn(BodyId) -> Option<Located>,
{
    fn locate(&self, id: BodyId) -> Option<Located> {
        self(id)
    }
}

/// Distance the eye keeps from a focused body: `radius * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Standoff {
    pub scale: f64,
    pub offset: f64,
}

impl Default for Standoff {
    fn default() -> Self {
        Self {
            scale: 4.0,
            offset: 8.0,
        }
    }
}

impl Standoff {
    pub fn distance(&self, radius: f64) -> f64 {
        radius * self.scale + self.offset
    }
}

/// Smoothing factors and limits.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerParams {
    /// Per-tick lerp factor of the target toward a locked body.
    pub target_smoothing: f64,
    /// Per-tick lerp factor of the eye toward its stand-off point.
    pub eye_smoothing: f64,
    /// Per-tick lerp factor of the target toward the origin when idle.
    pub idle_smoothing: f64,
    pub standoff: Standoff,
    /// Below this distance from the origin an idle target snaps to it.
    pub settle_radius: f64,
    /// Limits on eye-to-target distance, for zoom and stand-off alike.
    pub min_distance: f64,
    pub max_distance: f64,
    pub initial_eye: DVec3,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            target_smoothing: 0.1,
            eye_smoothing: 0.05,
            idle_smoothing: 0.05,
            standoff: Standoff::default(),
            settle_radius: 1e-4,
            min_distance: 2.0,
            max_distance: 3000.0,
            initial_eye: DVec3::new(0.0, 150.0, 300.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Idle,
    Locked(BodyId),
}

/// The camera pose plus focus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub target: DVec3,
    pub eye: DVec3,
    pub mode: CameraMode,
}

impl CameraState {
    pub fn focus(&self) -> Option<BodyId> {
        match self.mode {
            CameraMode::Idle => None,
            CameraMode::Locked(id) => Some(id),
        }
    }
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraTick {
    /// Locked and following the focused body.
    Updated,
    /// Idle; the target moved toward, or rests at, the origin.
    Relaxed,
    /// Locked, but the focused body had no transform. Nothing changed.
    SkippedMissingTransform,
}

/// Drives [`CameraState`] once per frame.
#[derive(Clone, Debug)]
pub struct CameraTracker {
    params: TrackerParams,
    state: CameraState,
}

impl Default for CameraTracker {
    fn default() -> Self {
        Self::new(TrackerParams::default())
    }
}

impl CameraTracker {
    pub fn new(params: TrackerParams) -> Self {
        let state = CameraState {
            target: DVec3::ZERO,
            eye: params.initial_eye,
            mode: CameraMode::Idle,
        };
        Self { params, state }
    }

    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Lock onto a body, or go idle with `None`. Replaces any previous focus.
    pub fn select(&mut self, focus: Option<BodyId>) {
        let mode = match focus {
            Some(id) => CameraMode::Locked(id),
            None => CameraMode::Idle,
        };
        if mode != self.state.mode {
            log::debug!("Camera mode {:?} -> {:?}", self.state.mode, mode);
        }
        self.state.mode = mode;
    }

    pub fn clear(&mut self) {
        self.select(None);
    }

    /// Where the eye is heading for a body at `located`, keeping the current
    /// viewing direction. The stand-off is held within the zoom limits.
    pub fn desired_eye(&self, located: Located) -> DVec3 {
        let dir = (self.state.eye - located.position)
            .try_normalize()
            .unwrap_or(DVec3::Z);
        let distance = self
            .params
            .standoff
            .distance(located.radius)
            .clamp(self.params.min_distance, self.params.max_distance);
        located.position + dir * distance
    }

    /// One frame of camera motion.
    pub fn tick(&mut self, world: &impl WorldLookup) -> CameraTick {
        match self.state.mode {
            CameraMode::Locked(id) => {
                let Some(located) = world.locate(id) else {
                    log::debug!("No transform for focused body {id:?}, skipping camera tick");
                    return CameraTick::SkippedMissingTransform;
                };
                self.state.target = self
                    .state
                    .target
                    .lerp(located.position, self.params.target_smoothing);
                let goal = self.desired_eye(located);
                self.state.eye = self.state.eye.lerp(goal, self.params.eye_smoothing);
                CameraTick::Updated
            }
            CameraMode::Idle => {
                if self.state.target.length() <= self.params.settle_radius {
                    self.state.target = DVec3::ZERO;
                } else {
                    self.state.target = self
                        .state
                        .target
                        .lerp(DVec3::ZERO, self.params.idle_smoothing);
                }
                CameraTick::Relaxed
            }
        }
    }

    /// Place the eye directly, as a user drag would.
    pub fn set_eye(&mut self, eye: DVec3) {
        self.state.eye = eye;
    }

    /// Orbit the eye around the target by `yaw` about world Y and `pitch`
    /// toward the poles. Pitch stops just short of straight up or down.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.state.eye - self.state.target;
        let radius = offset.length();
        if radius <= f64::EPSILON {
            return;
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.z.atan2(offset.x);

        const POLE_MARGIN: f64 = 1e-3;
        let polar = (polar - pitch).clamp(POLE_MARGIN, std::f64::consts::PI - POLE_MARGIN);
        let azimuth = azimuth + yaw;
        self.state.eye = self.state.target
            + DVec3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            ) * radius;
    }

    /// Scale the eye-to-target distance by `factor`, within the zoom limits.
    pub fn zoom(&mut self, factor: f64) {
        let offset = self.state.eye - self.state.target;
        let Some(dir) = offset.try_normalize() else {
            return;
        };
        let distance = (offset.length() * factor)
            .clamp(self.params.min_distance, self.params.max_distance);
        self.state.eye = self.state.target + dir * distance;
    }

    /// Orientation looking from the eye at the target with +Y up.
    pub fn look_rotation(&self) -> DQuat {
        let Some(forward) = (self.state.target - self.state.eye).try_normalize() else {
            return DQuat::IDENTITY;
        };
        let right = DVec3::Y.cross(forward).try_normalize().unwrap_or(DVec3::X);
        let up = forward.cross(right);
        DQuat::from_mat3(&DMat3::from_cols(right, up, forward))
    }

    pub fn distance(&self) -> f64 {
        (self.state.eye - self.state.target).length()
    }
}
