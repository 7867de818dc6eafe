//! Logging setup: console output on stderr plus a daily-rotating file in the
//! app data directory.
//!
//! ```no_run
//! use refugio::{config::AppConfig, logging};
//!
//! logging::init(&AppConfig::default()).expect("Failed to initialize logging");
//! tracing::info!("App started");
//! ```
//!
//! `log` records emitted by eframe/egui are forwarded into the same
//! subscriber.

use crate::config::{APP_NAME, AppConfig};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

const MAX_LOG_FILES: usize = 10;

/// Creates `dir` if needed and returns it.
///
/// # Errors
///
/// Returns error if the directory cannot be created.
pub fn ensure_log_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    Ok(dir.to_path_buf())
}

/// Initializes the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, else from the configured
/// level. The file layer is skipped when file logging is off or no data
/// directory can be determined.
///
/// # Errors
///
/// Returns error if the filter is invalid, the file appender cannot be
/// built, or a global subscriber is already installed.
pub fn init(config: &AppConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .context("Failed to create env filter")?;

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact();

    let file_layer = match config.log_dir().filter(|_| config.log.to_file) {
        Some(dir) => {
            let dir = ensure_log_dir(&dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(MAX_LOG_FILES)
                .filename_prefix(APP_NAME)
                .filename_suffix("log")
                .build(&dir)
                .context("Failed to create log file appender")?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender)
                    .with_filter(EnvFilter::new("info")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(log_dir = ?config.log_dir(), "Logging initialized");
    Ok(())
}
