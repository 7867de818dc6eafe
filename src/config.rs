//! Runtime settings. There is no settings file: defaults are overridden by
//! command-line flags, which in turn fall back to environment variables
//! (`REFUGIO_LOG`, `REFUGIO_LOG_DIR`). A set `RUST_LOG` wins over the level.

use std::path::PathBuf;

pub const APP_NAME: &str = "refugio";
pub const WINDOW_TITLE: &str = "Limpieza y Visualización de CSV";

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    /// `EnvFilter` directive, e.g. `info` or `refugio=debug`
    pub level: String,
    /// Overrides the platform data directory for log files
    pub dir: Option<PathBuf>,
    /// Write log files in addition to the console
    pub to_file: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            dir: None,
            to_file: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub log: LogSettings,
    pub window: WindowSettings,
}

impl AppConfig {
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.log.level = level;
        }
        self
    }

    pub fn with_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.log.dir = dir;
        }
        self
    }

    pub fn without_log_files(mut self) -> Self {
        self.log.to_file = false;
        self
    }

    /// Directory log files go to: the configured one, or
    /// - Windows: `%APPDATA%/refugio/logs`
    /// - macOS: `~/Library/Application Support/refugio/logs`
    /// - Linux: `~/.local/share/refugio/logs`
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log
            .dir
            .clone()
            .or_else(|| dirs::data_dir().map(|base| base.join(APP_NAME).join("logs")))
    }
}
