//! Version command implementation.

use anyhow::Result;
use serde::Serialize;

use crate::cli::VersionArgs;

#[derive(Serialize)]
struct VersionOutput<'a> {
    name: &'a str,
    version: &'a str,
    build: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &VersionArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if args.short {
        println!("{version}");
        return Ok(());
    }

    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if args.json {
        let output = VersionOutput {
            name: "itrack",
            version,
            build,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("itrack {version} ({build})");
    }

    Ok(())
}
