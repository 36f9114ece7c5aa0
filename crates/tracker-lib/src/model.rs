//! Core data types for tracker-lib.
//!
//! The serde layout is the wire format: keys appear in the order clients
//! expect and the id travels as `_id`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const fn default_open() -> bool {
    true
}

/// Serialize timestamps as RFC 3339 with exactly three fractional digits.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_timestamp<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

/// A single tracked record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Assigned user, empty when unassigned.
    #[serde(default)]
    pub assigned_to: String,

    /// Free-form status note.
    #[serde(default)]
    pub status_text: String,

    /// Whether the issue is still open.
    #[serde(default = "default_open")]
    pub open: bool,

    /// Store-generated id, unique across every project.
    #[serde(rename = "_id")]
    pub id: String,

    pub issue_title: String,

    pub issue_text: String,

    pub created_by: String,

    /// Creation timestamp. Never changes.
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_on: DateTime<Utc>,

    /// Refreshed on every successful update.
    #[serde(
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub updated_on: DateTime<Utc>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            assigned_to: String::new(),
            status_text: String::new(),
            open: true,
            id: String::new(),
            issue_title: String::new(),
            issue_text: String::new(),
            created_by: String::new(),
            created_on: DateTime::<Utc>::default(),
            updated_on: DateTime::<Utc>::default(),
        }
    }
}

impl Issue {
    /// True when every field required at creation is non-empty.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        !self.issue_title.is_empty() && !self.issue_text.is_empty() && !self.created_by.is_empty()
    }
}
