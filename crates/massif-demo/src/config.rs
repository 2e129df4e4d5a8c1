//! Demo configuration with RON persistence and CLI overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::CliArgs;

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain generation settings.
    pub terrain: TerrainSettings,
    /// Debug/logging settings.
    pub debug: DebugSettings,
}

/// Terrain generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    /// Seed for the deterministic terrain stream.
    pub seed: u64,
    /// Displacement decay control in `[0, 1]`.
    pub roughness: f32,
    /// First-pass displacement bound in height units.
    pub amplitude: f32,
    /// Lattice resolution exponent: the grid gets `2^divisions` faces per
    /// axis. Clamped to `[1, 10]` before use.
    pub divisions: u32,
    /// World-space extent along the U axis.
    pub width: f32,
    /// World-space extent along the V axis.
    pub length: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            seed: 1234,
            roughness: 0.1,
            amplitude: 2.0,
            divisions: 6,
            width: 10.0,
            length: 10.0,
        }
    }
}

/// Debug and logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugSettings {
    /// Log filter directive (e.g. "info" or "massif_terrain=debug").
    pub log_level: String,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}

impl Config {
    /// Load a config file, falling back to defaults if it cannot be read.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("using default config: {err}");
                Self::default()
            }
        }
    }

    /// Load and parse a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        ron::from_str(&text).map_err(ConfigError::Parse)
    }

    /// Serialize and write the config as RON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(ConfigError::Serialize)?;
        std::fs::write(path, text).map_err(ConfigError::Write)
    }

    /// Apply CLI overrides on top of loaded settings.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.terrain.seed = seed;
        }
        if let Some(roughness) = args.roughness {
            self.terrain.roughness = roughness;
        }
        if let Some(amplitude) = args.amplitude {
            self.terrain.amplitude = amplitude;
        }
        if let Some(divisions) = args.divisions {
            self.terrain.divisions = divisions;
        }
        if let Some(width) = args.width {
            self.terrain.width = width;
        }
        if let Some(length) = args.length {
            self.terrain.length = length;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
