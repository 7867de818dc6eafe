//! # Refugio - animal shelter record cleaning
//!
//! Refugio loads the comma-separated intake/outtake export of an animal
//! shelter, normalizes its inconsistent fields and offers filtering,
//! category charts and export of the cleaned table, from a desktop window
//! or the command line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use refugio::records;
//! use std::path::Path;
//!
//! # fn example() -> refugio::error::Result<()> {
//! let raw = records::load(Path::new("registros.csv"))?;
//! let table = records::clean(raw)?;
//!
//! for dist in records::chart_distributions(&table)? {
//!     println!("{}: {} categories", dist.title, dist.counts.len());
//! }
//!
//! records::save(&table, Path::new("registros_limpio.csv"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`records`]: table model, cleaning pipeline, filtering, summaries, CSV I/O
//! - [`error`]: error types and handling utilities
//! - [`config`]: runtime settings
//! - [`logging`]: tracing subscriber setup
//!
//! ## Pipeline
//!
//! [`records::clean`] is a pure function. Each stage consumes a
//! [`records::RecordTable`] and returns a new one; the stage list is
//! available as [`records::STAGES`] so every step can be exercised alone.
//! Malformed dates become missing cells instead of errors; a missing
//! required column aborts the whole call.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod logging;
pub mod records;
