//! Seed data loading.
//!
//! A fixture is either a JSON array of issues or JSONL with one issue per
//! line. Records keep their stored ids and timestamps.

use std::fs;
use std::path::Path;

use crate::error::{Result, TrackerError};
use crate::model::Issue;

/// Parse fixture text.
///
/// Text starting with `[` is read as a single JSON array; anything else is
/// read line by line, skipping blank lines.
///
/// # Errors
///
/// Returns `Json` for a malformed array or `FixtureParse` for a bad line.
pub fn parse(text: &str) -> Result<Vec<Issue>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut issues = Vec::new();
    for (line_num, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let issue: Issue =
            serde_json::from_str(trimmed).map_err(|e| TrackerError::FixtureParse {
                line: line_num + 1,
                reason: e.to_string(),
            })?;
        issues.push(issue);
    }
    Ok(issues)
}

/// Load a fixture file.
///
/// # Errors
///
/// Returns `FileNotFound` or `Io` if the file cannot be read, otherwise the
/// errors of [`parse`].
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TrackerError::FileNotFound(path.to_path_buf())
        } else {
            TrackerError::Io(e)
        }
    })?;
    let issues = parse(&text)?;
    tracing::debug!(path = %path.display(), count = issues.len(), "Loaded fixture");
    Ok(issues)
}
