//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! clock-config.toml file. It covers the host side of the clock only: the
//! preview surface size and the tick timing. Face geometry, colors and the
//! segment layout are fixed and not configurable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::framebuffer::MAX_DIMENSION;
use crate::DisplayMode;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "clock-config.toml";

/// Application configuration loaded from clock-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Drawing surface configuration
    pub display: DisplayConfig,
    /// Tick and mode configuration
    pub clock: ClockConfig,
}

/// Drawing surface configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Characters per line in the terminal preview
    pub preview_columns: u32,
}

/// Tick and mode configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClockConfig {
    /// Face shown at startup ("analog" or "digital")
    pub start_mode: DisplayMode,
    /// Redraw period in milliseconds
    pub tick_ms: u64,
    /// Delay after each digital frame before the seconds dots go dark
    pub blink_ms: u64,
    /// Frames to draw before exiting; 0 runs until interrupted
    pub frames: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            display: DisplayConfig {
                width: 300,
                height: 300,
                preview_columns: 75,
            },
            clock: ClockConfig {
                start_mode: DisplayMode::Digital,
                tick_ms: 1000,
                blink_ms: 500,
                frames: 0,
            },
        }
    }
}

impl ClockConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn blink(&self) -> Duration {
        Duration::from_millis(self.blink_ms)
    }
}

impl Config {
    /// Load configuration from clock-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), mode = %config.clock.start_mode, "loaded configuration");
                    config.sanitized()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                info!(path = %path.display(), "no config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save current configuration to `path` as pretty TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    /// Repair values the controller cannot run with.
    fn sanitized(mut self) -> Self {
        let defaults = Config::default();
        if self.clock.start_mode == DisplayMode::Idle {
            warn!("start_mode idle would never draw, starting digital");
            self.clock.start_mode = DisplayMode::Digital;
        }
        if self.clock.tick_ms == 0 {
            warn!("tick_ms must be positive, using {}", defaults.clock.tick_ms);
            self.clock.tick_ms = defaults.clock.tick_ms;
        }
        if self.clock.blink_ms >= self.clock.tick_ms {
            let blink = self.clock.tick_ms / 2;
            warn!(
                blink_ms = self.clock.blink_ms,
                "blink_ms must be shorter than tick_ms, using {blink}"
            );
            self.clock.blink_ms = blink;
        }
        for (name, value, default) in [
            ("width", &mut self.display.width, defaults.display.width),
            ("height", &mut self.display.height, defaults.display.height),
        ] {
            if *value == 0 {
                warn!(dimension = name, "display size must be positive, using {default}");
                *value = default;
            } else if *value > MAX_DIMENSION {
                warn!(
                    dimension = name,
                    value = *value,
                    "display size too large, capping at {MAX_DIMENSION}"
                );
                *value = MAX_DIMENSION;
            }
        }
        if self.display.preview_columns == 0 {
            self.display.preview_columns = defaults.display.preview_columns;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.width, 300);
        assert_eq!(config.display.height, 300);
        assert_eq!(config.clock.start_mode, DisplayMode::Digital);
        assert_eq!(config.clock.tick(), Duration::from_secs(1));
        assert_eq!(config.clock.blink(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[display]
width = 320
height = 240
preview_columns = 80

[clock]
start_mode = "analog"
tick_ms = 1000
blink_ms = 250
frames = 3
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.display.width, 320);
        assert_eq!(config.clock.start_mode, DisplayMode::Analog);
        assert_eq!(config.clock.blink_ms, 250);
        assert_eq!(config.clock.frames, 3);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "this is not toml = [").unwrap();
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_sanitize_timing() {
        let mut config = Config::default();
        config.clock.start_mode = DisplayMode::Idle;
        config.clock.tick_ms = 400;
        config.clock.blink_ms = 900;
        let config = config.sanitized();
        assert_eq!(config.clock.start_mode, DisplayMode::Digital);
        assert_eq!(config.clock.blink_ms, 200);
    }

    #[test]
    fn test_sanitize_display_size() {
        let mut config = Config::default();
        config.display.width = 70_000;
        config.display.height = 0;
        let config = config.sanitized();
        assert_eq!(config.display.width, MAX_DIMENSION);
        assert_eq!(config.display.height, 300);
    }

    #[test]
    fn test_load_oversized_display_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[display]
width = 4000000000
height = 70000
preview_columns = 75

[clock]
start_mode = "digital"
tick_ms = 1000
blink_ms = 500
frames = 0
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.display.width, MAX_DIMENSION);
        assert_eq!(config.display.height, MAX_DIMENSION);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.clock.start_mode = DisplayMode::Analog;
        config.save_to_path(&path).unwrap();
        assert_eq!(Config::load_from_path(&path), config);
    }
}
