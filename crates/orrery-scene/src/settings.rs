//! Everything a [`Scene`](crate::Scene) needs at build time, mapped from
//! the persisted [`Config`].

use glam::DVec3;
use orrery_camera::{Standoff, TrackerParams};
use orrery_config::Config;
use orrery_orbit::{BeltParams, DEFAULT_DAMPING, GUIDE_SEGMENTS, SpinRates};
use orrery_surface::SynthesisSettings;

use crate::SeedPolicy;

#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub seed: SeedPolicy,
    pub synthesis: SynthesisSettings,
    pub damping: f64,
    pub spin: SpinRates,
    pub camera: TrackerParams,
    /// `None` builds no belt.
    pub belt: Option<BeltParams>,
    pub initial_speed: f64,
    pub guide_segments: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            seed: SeedPolicy::Entropy,
            synthesis: SynthesisSettings::default(),
            damping: DEFAULT_DAMPING,
            spin: SpinRates::default(),
            camera: TrackerParams::default(),
            belt: Some(BeltParams::default()),
            initial_speed: 1.0,
            guide_segments: GUIDE_SEGMENTS,
        }
    }
}

impl SceneSettings {
    pub fn from_config(config: &Config) -> Self {
        let synthesis = &config.synthesis;
        let orbit = &config.orbit;
        let camera = &config.camera;
        let belt = &config.belt;

        Self {
            seed: SeedPolicy::from_option(synthesis.seed),
            synthesis: SynthesisSettings {
                resolution: synthesis.resolution,
                cloud_resolution: synthesis.cloud_resolution,
                ring_width: synthesis.ring_width,
                max_resolution: synthesis.max_resolution,
            },
            damping: orbit.damping,
            spin: SpinRates {
                body: orbit.spin_rate,
                cloud_yaw: orbit.cloud_spin_rate,
                cloud_pitch: orbit.cloud_tilt_rate,
            },
            camera: TrackerParams {
                target_smoothing: camera.target_smoothing,
                eye_smoothing: camera.eye_smoothing,
                idle_smoothing: camera.idle_smoothing,
                standoff: Standoff {
                    scale: camera.standoff_scale,
                    offset: camera.standoff_offset,
                },
                settle_radius: camera.idle_snap_radius,
                min_distance: camera.min_distance,
                max_distance: camera.max_distance,
                initial_eye: DVec3::from_array(camera.initial_eye),
            },
            belt: (belt.count > 0).then(|| BeltParams {
                count: belt.count,
                inner_radius: belt.inner_radius,
                width: belt.width,
                vertical_spread: belt.vertical_spread,
                min_scale: belt.min_scale,
                scale_range: belt.scale_range,
                spin_rate: belt.spin_rate,
            }),
            initial_speed: orbit.initial_speed,
            guide_segments: GUIDE_SEGMENTS,
        }
    }
}
