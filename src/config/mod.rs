//! Configuration management for `issue_tracker`.
//!
//! Server settings come from command-line flags, each of which can also be
//! supplied through an environment variable:
//! - `ITRACK_BIND` / `--bind`: listen address (default `0.0.0.0`)
//! - `PORT` / `--port`: listen port (default 3000)
//! - `ITRACK_FIXTURE` / `--fixture`: JSON or JSONL file of seed issues
//! - `TEST_DATA`: inline JSON array of seed issues
//!
//! Seed issues go into a single project, `test` unless overridden.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tracing::info;
use tracker_lib::{InMemoryStore, fixture};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Project that receives seed issues unless overridden.
pub const DEFAULT_FIXTURE_PROJECT: &str = "test";

/// Environment variable holding an inline JSON fixture.
pub const TEST_DATA_ENV: &str = "TEST_DATA";

/// Raw values collected from flags and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<IpAddr>,
    pub port: Option<u16>,
    pub fixture: Option<PathBuf>,
    pub fixture_project: Option<String>,
    pub test_data: Option<String>,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub fixture_path: Option<PathBuf>,
    pub fixture_inline: Option<String>,
    pub fixture_project: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::resolve(&CliOverrides::default())
    }
}

impl ServerConfig {
    /// Merge overrides with defaults.
    #[must_use]
    pub fn resolve(overrides: &CliOverrides) -> Self {
        let ip = overrides
            .bind
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = overrides.port.unwrap_or(DEFAULT_PORT);
        Self {
            addr: SocketAddr::new(ip, port),
            fixture_path: overrides.fixture.clone(),
            fixture_inline: overrides
                .test_data
                .clone()
                .filter(|data| !data.trim().is_empty()),
            fixture_project: overrides
                .fixture_project
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| DEFAULT_FIXTURE_PROJECT.to_string()),
        }
    }

    /// Build the store, seeding it from the fixture file and then the inline
    /// fixture when configured.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture cannot be read or parsed, or repeats an
    /// id.
    pub fn build_store(&self) -> tracker_lib::Result<InMemoryStore> {
        let mut store = InMemoryStore::new();

        if let Some(path) = &self.fixture_path {
            let issues = fixture::load(path)?;
            store.seed(&self.fixture_project, issues)?;
        }
        if let Some(data) = &self.fixture_inline {
            let issues = fixture::parse(data)?;
            store.seed(&self.fixture_project, issues)?;
        }

        info!(
            issues = store.len(),
            projects = store.project_names().len(),
            "Store ready"
        );
        Ok(store)
    }
}
