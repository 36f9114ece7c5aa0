//! `issue_tracker` (itrack) - Multi-project issue tracker over HTTP.
//!
//! Holds every issue in memory; nothing survives a restart except the
//! optional fixture loaded at startup.

use issue_tracker::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
