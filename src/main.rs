use anyhow::{Context, Result};
use log::{error, info};
use std::path::{Path, PathBuf};

mod core;
mod engine;
mod game;

use crate::core::config::{GameConfig, DEFAULT_CONFIG_PATH};
use crate::engine::assets::AssetLoader;
use crate::engine::game_loop::GameLoop;
use crate::engine::renderer::Surface;
use crate::game::menu::MenuState;
use crate::game::Gamestate;

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // The config decides the log level, so its own errors go to stderr
    let config = match GameConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal error: {e:#}");
            std::process::exit(1);
        }
    };

    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(config.log_level())
        .init();

    if let Err(e) = run(&config) {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

/// Data locations tried after the configured data directory
fn search_roots() -> Vec<PathBuf> {
    let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    else {
        return Vec::new();
    };

    ["../share/derpy-stage/data", "../data", "../Resources/data", "data"]
        .iter()
        .map(|relative| exe_dir.join(relative))
        .collect()
}

fn run(config: &GameConfig) -> Result<()> {
    info!("Starting Derpy Stage...");

    let loader = search_roots()
        .into_iter()
        .fold(AssetLoader::new(&config.data_dir), AssetLoader::with_search_root);

    let mut state = MenuState::new(Box::new(loader), config);
    info!("Loading gamestate {}", state.name());
    state
        .load()
        .with_context(|| format!("Failed to load gamestate {}", state.name()))?;
    state
        .start()
        .with_context(|| format!("Failed to start gamestate {}", state.name()))?;

    let mut target = Surface::new(config.viewport_width, config.viewport_height);
    let mut game_loop = GameLoop::new(config.ticks_per_second);

    // Main loop: fixed-rate ticks, one draw per frame
    while config.run_ticks == 0 || game_loop.tick_count() < config.run_ticks {
        let ticks = game_loop.begin_frame();
        for _ in 0..ticks {
            state.logic();
        }
        if ticks > 0 {
            state.draw(&mut target);
        }

        std::thread::sleep(game_loop.time_until_next_tick());
    }

    info!(
        "Ran {} ticks over {} frames",
        game_loop.tick_count(),
        game_loop.frame_count()
    );

    if let Some(path) = &config.snapshot {
        target
            .save(path)
            .with_context(|| format!("Failed to save snapshot {}", path.display()))?;
        info!("Saved snapshot to {}", path.display());
    }

    info!("Stopping gamestate {}", state.name());
    state.stop();
    state.unload();

    Ok(())
}
