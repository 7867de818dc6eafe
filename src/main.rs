//! # Refugio application entry point
//!
//! With a subcommand the binary runs as a command-line tool; without one it
//! opens the desktop window.
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging
//!   │
//!   ├─> If command provided:
//!   │   └─> Execute CLI command
//!   │
//!   └─> Otherwise:
//!       └─> Launch eframe window
//! ```
//!
//! ```bash
//! refugio clean --file registros.csv
//! refugio
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;
mod gui;
mod theme;

use clap::Parser as _;
use refugio::config::AppConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    let mut config = AppConfig::default()
        .with_log_level(cli.log_level.clone())
        .with_log_dir(cli.log_dir.clone());
    if cli.no_log_file {
        config = config.without_log_files();
    }

    // Logging is best effort: a read-only data dir must not block the app.
    if let Err(e) = refugio::logging::init(&config) {
        eprintln!("Logging disabled: {e:#}");
    }

    if let Some(command) = cli.command {
        cli::run_command(command)?;
        return Ok(());
    }

    // Blocks until the window is closed
    gui::run(&config)?;
    Ok(())
}
