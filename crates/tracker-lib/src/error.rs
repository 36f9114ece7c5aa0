//! Error types for `tracker-lib`.
//!
//! Store outcomes that the transport reports back to callers carry the exact
//! wire message in their `Display` output. Fixture variants only surface at
//! startup.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for tracker-lib operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Validation Errors ===
    /// Create was called without `issue_title`, `issue_text` or `created_by`.
    #[error("required field(s) missing")]
    RequiredFieldsMissing,

    /// Update or delete was called without an `_id`.
    #[error("missing _id")]
    MissingId,

    /// Update carried an `_id` but nothing to change.
    #[error("no update field(s) sent")]
    NoUpdateFields { id: String },

    // === Not Found Errors ===
    /// Update target is not in the project.
    #[error("could not update")]
    CouldNotUpdate { id: String },

    /// Delete target is not in the project.
    #[error("could not delete")]
    CouldNotDelete { id: String },

    // === Fixture Errors ===
    /// Seeding would duplicate an id already held by the store.
    #[error("Issue ID collision: {id}")]
    IdCollision { id: String },

    /// A seed record was last updated before it was created.
    #[error("Issue {id}: updated_on precedes created_on")]
    TimestampOrder { id: String },

    /// Failed to parse a record in a fixture.
    #[error("Fixture parse error at line {line}: {reason}")]
    FixtureParse { line: usize, reason: String },

    /// Fixture file not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Broad classification of a [`TrackerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied unusable input.
    Validation,
    /// The addressed project or issue does not exist.
    NotFound,
    /// Loading seed data failed.
    Fixture,
}

impl TrackerError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::RequiredFieldsMissing | Self::MissingId | Self::NoUpdateFields { .. } => {
                ErrorKind::Validation
            }
            Self::CouldNotUpdate { .. } | Self::CouldNotDelete { .. } => ErrorKind::NotFound,
            Self::IdCollision { .. }
            | Self::TimestampOrder { .. }
            | Self::FixtureParse { .. }
            | Self::FileNotFound(_)
            | Self::Io(_)
            | Self::Json(_) => ErrorKind::Fixture,
        }
    }

    /// The issue id the failed request named, when it named one.
    #[must_use]
    pub fn issue_id(&self) -> Option<&str> {
        match self {
            Self::NoUpdateFields { id }
            | Self::CouldNotUpdate { id }
            | Self::CouldNotDelete { id } => Some(id),
            _ => None,
        }
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;
