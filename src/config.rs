use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CELL_SIZE_RANGE: (u32, u32) = (1, 16);
pub const TICK_MS_RANGE: (u64, u64) = (5, 500);
pub const WINDOW_PX_RANGE: (u32, u32) = (1, 4096);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Sandbox configuration, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Pixels per grid cell (1-16)
    pub cell_size: u32,
    /// Milliseconds between ticks (5-500)
    pub tick_ms: u64,
    /// RNG seed; None seeds from OS entropy
    pub seed: Option<u64>,
    /// Color of empty cells
    pub background: Rgb,
    /// Window width in pixels (1-4096); None fills the terminal canvas
    pub width: Option<u32>,
    /// Window height in pixels (1-4096); None fills the terminal canvas
    pub height: Option<u32>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            version: 1,
            cell_size: 1,
            tick_ms: 16,
            seed: None,
            background: Rgb::BACKGROUND,
            width: None,
            height: None,
        }
    }
}

impl SandboxConfig {
    /// Default location: `<config dir>/falling-sand/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("falling-sand").join("config.json"))
    }

    /// Export config to a JSON file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }

    /// Import config from a JSON file. Missing fields take defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SandboxConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(config.clamped())
    }

    /// Bring numeric fields into their supported ranges
    pub fn clamped(mut self) -> Self {
        self.cell_size = self.cell_size.clamp(CELL_SIZE_RANGE.0, CELL_SIZE_RANGE.1);
        self.tick_ms = self.tick_ms.clamp(TICK_MS_RANGE.0, TICK_MS_RANGE.1);
        self.width = self.width.map(|w| w.clamp(WINDOW_PX_RANGE.0, WINDOW_PX_RANGE.1));
        self.height = self.height.map(|h| h.clamp(WINDOW_PX_RANGE.0, WINDOW_PX_RANGE.1));
        self
    }

    /// Window size in pixels: configured values where set, else the canvas
    pub fn window_size(&self, canvas_width: u32, canvas_height: u32) -> (u32, u32) {
        (
            self.width.unwrap_or(canvas_width),
            self.height.unwrap_or(canvas_height),
        )
    }
}
