//! Configuration for the orrery.
//!
//! Settings persist to disk as `config.ron`. Every section defaults, so a
//! partial or older file still loads. Command-line flags override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BeltConfig, CameraConfig, Config, DebugConfig, OrbitConfig, SynthesisConfig,
    default_config_dir,
};
pub use error::ConfigError;
