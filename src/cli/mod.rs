//! Command-line interface for `issue_tracker`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{CliOverrides, DEFAULT_FIXTURE_PROJECT, TEST_DATA_ENV};
use crate::logging::{self, LogFormat};

/// `issue_tracker` (itrack) - Multi-project issue tracker over HTTP.
#[derive(Parser, Debug)]
#[command(name = "itrack")]
#[command(
    author,
    version,
    about = "Multi-project issue tracker served over HTTP",
    long_about = None,
    after_help = "All data is held in memory and lost on shutdown."
)]
pub struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "ITRACK_BIND")]
    pub bind: Option<IpAddr>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// JSON array or JSONL file of issues to preload
    #[arg(long, env = "ITRACK_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Project that receives preloaded issues
    #[arg(long, default_value = DEFAULT_FIXTURE_PROJECT)]
    pub fixture_project: String,

    /// Inline JSON array of issues to preload
    #[arg(long, env = TEST_DATA_ENV, hide_env_values = true)]
    pub test_data: Option<String>,
}

impl ServeArgs {
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind: self.bind,
            port: self.port,
            fixture: self.fixture.clone(),
            fixture_project: Some(self.fixture_project.clone()),
            test_data: self.test_data.clone(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct VersionArgs {
    /// Print only the version number
    #[arg(long)]
    pub short: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::execute(&args),
        Some(Commands::Version(args)) => commands::version::execute(&args),
        None => {
            println!("itrack - Multi-project issue tracker. Use --help for usage.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "itrack",
            "-v",
            "serve",
            "--bind",
            "127.0.0.1",
            "--port",
            "4000",
            "--fixture-project",
            "demo",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Some(Commands::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.port, Some(4000));
        assert_eq!(overrides.fixture_project.as_deref(), Some("demo"));
    }

    #[test]
    fn test_parse_log_format() {
        let cli = Cli::try_parse_from(["itrack", "--log-format", "json", "version"]).unwrap();
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Some(Commands::Version(_))));
    }
}
