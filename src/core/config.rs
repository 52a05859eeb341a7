// Game configuration loaded from a TOML file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file looked up next to the executable's working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Runtime options for the game
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Root directory searched for data files
    pub data_dir: PathBuf,
    /// Verbose logging
    pub debug: bool,
    /// Fixed simulation rate
    pub ticks_per_second: u32,
    /// Animation playback multiplier (0 pauses animation)
    pub speed_modifier: f32,
    /// Number of simulation ticks to run before exiting (0 = run forever)
    pub run_ticks: u64,
    /// Width of the render target in pixels
    pub viewport_width: u32,
    /// Height of the render target in pixels
    pub viewport_height: u32,
    /// Where to save the last rendered frame, if anywhere
    pub snapshot: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            debug: false,
            ticks_per_second: 60,
            speed_modifier: 1.0,
            run_ticks: 600,
            viewport_width: 320,
            viewport_height: 180,
            snapshot: None,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration at `path`, falling back to defaults if it doesn't exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Log level matching the `debug` flag
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Convert seconds into simulation ticks at the configured rate
    pub fn seconds_to_ticks(&self, seconds: u64) -> u64 {
        seconds * self.ticks_per_second as u64
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.ticks_per_second > 0, "ticks_per_second must be positive");
        anyhow::ensure!(
            self.speed_modifier.is_finite(),
            "speed_modifier must be a finite number"
        );
        anyhow::ensure!(
            self.viewport_width > 0 && self.viewport_height > 0,
            "viewport must not be empty"
        );
        Ok(())
    }
}
