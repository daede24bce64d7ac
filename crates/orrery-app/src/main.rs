//! The `orrery` binary: loads config, sets up logging, and runs the
//! animation against the headless renderer.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::{Orrery, stop_on_interrupt};
use orrery_app::platform::PlatformDirs;
use orrery_config::{CliArgs, Config};
use orrery_render::HeadlessRenderer;
use orrery_scene::WallClockSource;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(root) => PlatformDirs::with_root(root),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        return ExitCode::FAILURE;
    }

    // Logging depends on the config, so the load outcome is reported once
    // the subscriber is installed.
    let (mut config, loaded) = match Config::load_or_create_with_origin(&dirs.config_dir) {
        Ok((config, origin)) => (config, Ok(origin)),
        Err(e) => (Config::default(), Err(e)),
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(dirs.log_dir.as_path()), cfg!(debug_assertions), Some(&config));
    match loaded {
        Ok(origin) => info!("{origin}"),
        Err(e) => warn!("{e}; continuing with default settings"),
    }

    let mut orrery = match Orrery::new(&config, HeadlessRenderer::new()) {
        Ok(orrery) => orrery,
        Err(e) => {
            error!("Failed to build scene: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut source =
        WallClockSource::new(config.debug.max_frames).with_target_fps(config.render.target_fps);
    if let Err(e) = stop_on_interrupt(source.stop_signal()) {
        warn!("Failed to install Ctrl-C handler: {e}");
    }

    match orrery.run(&mut source) {
        Ok(stats) => {
            let totals = orrery.renderer().totals();
            info!(
                "Rendered {} frames in {:.2}s: {} triangles, {} points, {} visible vertices",
                stats.frames, stats.elapsed, totals.triangles, totals.points, totals.visible_vertices
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Animation stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
