//! Configuration structures and loading logic.

pub mod monitor;


use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::log;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub surface: SurfaceConfig,
    pub feed: FeedConfig,
    pub window: WindowConfig,
}

/// Texture surface dimensions. Fixed for the lifetime of the view; a change
/// only takes effect on restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl SurfaceConfig {
    /// Width clamped to a positive value.
    pub fn effective_width(&self) -> u32 {
        self.width.max(1)
    }

    /// Height clamped to a positive value.
    pub fn effective_height(&self) -> u32 {
        self.height.max(1)
    }
}

/// Pacing of the synthetic bitmap feed driving the viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Milliseconds between source ticks.
    pub tick_ms: u64,
    /// Rows the content scrolls per tick.
    pub scroll_rows: u32,
    /// Ticks between simulated navigations (0 = never).
    pub reset_every: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_ms: 33,
            scroll_rows: 3,
            reset_every: 0,
        }
    }
}

impl FeedConfig {
    /// Tick interval clamped to at least 1ms.
    pub fn effective_tick_ms(&self) -> u64 {
        self.tick_ms.max(1)
    }
}

/// Viewer window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "webtex".to_owned(),
        }
    }
}

/// Directory the config file lives in: next to the executable.
pub fn config_dir() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_default()
        .parent()
        .unwrap_or(std::path::Path::new("."))
        .to_path_buf()
}

pub fn config_path() -> PathBuf {
    config_dir().join("webtex.toml")
}

impl Config {
    /// Load from `config_path()`, falling back to defaults when the file is
    /// absent or malformed (the error is logged, never fatal).
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    log(&format!("config: parse error in {}: {e}", path.display()));
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
