//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Texture synthesis settings.
    pub synthesis: SynthesisConfig,
    /// Orbit and spin rates.
    pub orbit: OrbitConfig,
    /// Camera smoothing and limits.
    pub camera: CameraConfig,
    /// Asteroid belt shape.
    pub belt: BeltConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Texture synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Side of square surface textures in pixels.
    pub resolution: u32,
    /// Side of square cloud textures in pixels.
    pub cloud_resolution: u32,
    /// Width of ring band textures in pixels.
    pub ring_width: u32,
    /// Scene seed. `None` draws one from system entropy at startup.
    pub seed: Option<u64>,
    /// Largest texture side accepted.
    pub max_resolution: u32,
}

/// Orbit and spin configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Scale from speed coefficient to radians per second.
    pub damping: f64,
    /// Body spin in radians per second.
    pub spin_rate: f64,
    /// Cloud layer yaw in radians per second.
    pub cloud_spin_rate: f64,
    /// Cloud layer pitch drift in radians per second.
    pub cloud_tilt_rate: f64,
    /// Global speed multiplier at startup. Zero starts paused.
    pub initial_speed: f64,
}

/// Camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub target_smoothing: f64,
    pub eye_smoothing: f64,
    pub idle_smoothing: f64,
    /// Stand-off distance is `radius * standoff_scale + standoff_offset`.
    pub standoff_scale: f64,
    pub standoff_offset: f64,
    /// Idle target snaps to the origin inside this radius.
    pub idle_snap_radius: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub initial_eye: [f64; 3],
}

/// Asteroid belt configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BeltConfig {
    /// Number of rocks. Zero disables the belt.
    pub count: u32,
    pub inner_radius: f64,
    pub width: f64,
    pub vertical_spread: f64,
    pub min_scale: f64,
    pub scale_range: f64,
    /// Radians per 60 Hz frame.
    pub spin_rate: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write every synthesized texture as PNG.
    pub dump_textures: bool,
    /// Directory for dumped textures.
    pub output_dir: PathBuf,
}

// --- Default implementations ---

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            resolution: 512,
            cloud_resolution: 512,
            ring_width: 256,
            seed: None,
            max_resolution: 4096,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            damping: 0.1,
            spin_rate: 0.05,
            cloud_spin_rate: 0.07,
            cloud_tilt_rate: 0.02,
            initial_speed: 1.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            target_smoothing: 0.1,
            eye_smoothing: 0.05,
            idle_smoothing: 0.05,
            standoff_scale: 4.0,
            standoff_offset: 8.0,
            idle_snap_radius: 1e-4,
            min_distance: 2.0,
            max_distance: 3000.0,
            initial_eye: [0.0, 150.0, 300.0],
        }
    }
}

impl Default for BeltConfig {
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

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dump_textures: false,
            output_dir: PathBuf::from("textures"),
        }
    }
}

/// Per-user configuration directory, e.g. `~/.config/orrery` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("orrery"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
