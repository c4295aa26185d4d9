//! Headless orrery run.
//!
//! Loads `config.ron` (CLI flags override it), builds the built-in solar
//! system or a RON catalog, steps it for `--ticks` frames and logs where
//! everything ended up. With `--dump-textures` every synthesized bitmap is
//! written as PNG.
//!
//! Run with: `cargo run -p orrery-demo -- --seed 42 --focus Saturn --dump-textures`

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use orrery_bodies::{BodyError, catalog};
use orrery_camera::CameraTick;
use orrery_config::{CliArgs, Config, default_config_dir};
use orrery_scene::{FIXED_DT, FrameClock, Scene, SceneError, SceneSettings};
use orrery_surface::{SynthesisError, TextureLayer, write_png};
use tracing::{debug, error, info};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Catalog(#[from] BodyError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("failed to export texture: {0}")]
    Export(#[from] SynthesisError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}, using current directory");
            PathBuf::from(".")
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, config: &Config) -> Result<(), DemoError> {
    let root = match &args.catalog {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            catalog::load(path)?
        }
        None => catalog::solar_system(),
    };

    let mut scene = Scene::build(root, SceneSettings::from_config(config))?;
    scene.select_by_name(args.focus.as_deref())?;

    let mut clock = FrameClock::new();
    let mut skipped = 0u32;
    for _ in 0..args.ticks {
        clock.advance(FIXED_DT, |dt, _| {
            if scene.tick(dt) == CameraTick::SkippedMissingTransform {
                skipped += 1;
            }
        });
    }
    info!(
        "Simulated {:.2}s in {} steps at speed {} ({} camera ticks skipped)",
        clock.total_sim_time(),
        clock.update_count(),
        scene.speed(),
        skipped
    );

    for (id, node) in scene.tree().iter() {
        if let Some(transform) = scene.body_transform(id) {
            let p = transform.position;
            debug!(
                "{:<10} ({:>8.2}, {:>5.2}, {:>8.2})",
                node.descriptor.name, p.x, p.y, p.z
            );
        }
    }

    let pose = scene.camera_pose();
    info!(
        "Camera eye ({:.1}, {:.1}, {:.1}) target ({:.1}, {:.1}, {:.1})",
        pose.eye.x, pose.eye.y, pose.eye.z, pose.target.x, pose.target.y, pose.target.z
    );

    if config.debug.dump_textures {
        let written = dump_textures(&scene, &config.debug.output_dir)?;
        info!(
            "Wrote {written} textures to {}",
            config.debug.output_dir.display()
        );
    }
    Ok(())
}

fn texture_file_name(body: &str, layer: TextureLayer) -> String {
    format!("{}_{}.png", body.to_lowercase(), layer.name())
}

fn dump_textures(scene: &Scene, dir: &Path) -> Result<usize, SynthesisError> {
    let mut written = 0;
    for (body, layer, texture) in scene.textures() {
        let path = dir.join(texture_file_name(body, layer));
        write_png(texture, &path)?;
        debug!("Wrote {}", path.display());
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_scene::SeedPolicy;
    use orrery_surface::SynthesisSettings;

    #[test]
    fn test_texture_file_name() {
        assert_eq!(texture_file_name("Saturn", TextureLayer::Ring), "saturn_ring.png");
        assert_eq!(texture_file_name("Earth", TextureLayer::Clouds), "earth_clouds.png");
    }

    #[test]
    fn test_dump_writes_every_layer() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SceneSettings {
            seed: SeedPolicy::Fixed(1),
            synthesis: SynthesisSettings {
                resolution: 8,
                cloud_resolution: 8,
                ring_width: 8,
                ..SynthesisSettings::default()
            },
            belt: None,
            ..SceneSettings::default()
        };
        let scene = Scene::build(catalog::solar_system(), settings).unwrap();
        let written = dump_textures(&scene, dir.path()).unwrap();
        assert_eq!(written, scene.textures().count());
        assert!(dir.path().join("earth_clouds.png").exists());
        assert!(dir.path().join("saturn_ring.png").exists());
    }
}
