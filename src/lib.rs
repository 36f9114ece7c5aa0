//! `issue_tracker` - Multi-project issue tracker served over HTTP
//!
//! This crate wires the `tracker-lib` store to an axum server and the `itrack`
//! command line.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Server configuration from flags and environment
//! - [`format`] - Response envelopes (results and errors)
//! - [`logging`] - Tracing subscriber setup
//! - [`server`] - HTTP routes and handlers

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod server;

pub use tracker_lib::{InMemoryStore, Issue, TrackerError};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
