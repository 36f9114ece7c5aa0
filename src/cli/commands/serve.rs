//! Serve command implementation.

use anyhow::{Context, Result};

use crate::cli::ServeArgs;
use crate::config::ServerConfig;
use crate::server;

/// Execute the serve command.
///
/// # Errors
///
/// Returns an error if the runtime cannot start, fixture data fails to load,
/// or the server fails.
pub fn execute(args: &ServeArgs) -> Result<()> {
    let config = ServerConfig::resolve(&args.overrides());
    tracing::debug!(?config, "Resolved server configuration");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server::serve(&config))
}
