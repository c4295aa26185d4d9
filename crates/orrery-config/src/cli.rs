//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Procedural star system model")]
pub struct CliArgs {
    /// Scene seed for reproducible textures and orbits.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Surface texture resolution in pixels.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Global speed multiplier (0 pauses).
    #[arg(long, allow_negative_numbers = true)]
    pub speed: Option<f64>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub ticks: u32,

    /// Body to lock the camera on.
    #[arg(long)]
    pub focus: Option<String>,

    /// RON catalog to load instead of the built-in solar system.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write synthesized textures as PNG.
    #[arg(long)]
    pub dump_textures: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.synthesis.seed = Some(seed);
        }
        if let Some(res) = args.resolution {
            self.synthesis.resolution = res;
            self.synthesis.cloud_resolution = res;
        }
        if let Some(speed) = args.speed {
            self.orbit.initial_speed = speed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.dump_textures {
            self.debug.dump_textures = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(99),
            resolution: Some(128),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.synthesis.seed, Some(99));
        assert_eq!(config.synthesis.resolution, 128);
        assert_eq!(config.synthesis.cloud_resolution, 128);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.orbit.initial_speed, 1.0);
        assert!(!config.debug.dump_textures);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "orrery",
            "--seed",
            "7",
            "--speed",
            "-2.5",
            "--focus",
            "Saturn",
            "--dump-textures",
        ]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.speed, Some(-2.5));
        assert_eq!(args.focus.as_deref(), Some("Saturn"));
        assert_eq!(args.ticks, 600);
        assert!(args.dump_textures);
    }
}
