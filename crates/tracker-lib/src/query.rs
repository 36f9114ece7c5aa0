//! Query filter types for listing issues.
//!
//! Each requested `field=value` pair becomes one [`FieldFilter`], normalized
//! to the type of the field it targets. An issue is listed only if every
//! filter matches.

use chrono::{DateTime, NaiveDate, Utc};

use crate::fields::{ID_KEY, parse_open};
use crate::model::Issue;

/// One equality constraint against an issue field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    Id(String),
    IssueTitle(String),
    IssueText(String),
    CreatedBy(String),
    AssignedTo(String),
    StatusText(String),
    Open(bool),
    /// `None` when the value did not parse; such a filter matches nothing.
    CreatedOn(Option<DateTime<Utc>>),
    UpdatedOn(Option<DateTime<Utc>>),
    /// A field issues do not have. Never matches.
    Unknown(String),
}

impl FieldFilter {
    /// Normalize a raw query pair.
    #[must_use]
    pub fn parse(field: &str, value: &str) -> Self {
        match field {
            ID_KEY => Self::Id(value.to_string()),
            "issue_title" => Self::IssueTitle(value.to_string()),
            "issue_text" => Self::IssueText(value.to_string()),
            "created_by" => Self::CreatedBy(value.to_string()),
            "assigned_to" => Self::AssignedTo(value.to_string()),
            "status_text" => Self::StatusText(value.to_string()),
            "open" => Self::Open(parse_open(value)),
            "created_on" => Self::CreatedOn(parse_timestamp(value)),
            "updated_on" => Self::UpdatedOn(parse_timestamp(value)),
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether `issue` satisfies this constraint.
    ///
    /// Timestamps compare as instants, not by their textual form.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        match self {
            Self::Id(v) => issue.id == *v,
            Self::IssueTitle(v) => issue.issue_title == *v,
            Self::IssueText(v) => issue.issue_text == *v,
            Self::CreatedBy(v) => issue.created_by == *v,
            Self::AssignedTo(v) => issue.assigned_to == *v,
            Self::StatusText(v) => issue.status_text == *v,
            Self::Open(v) => issue.open == *v,
            Self::CreatedOn(v) => v.is_some_and(|ts| issue.created_on == ts),
            Self::UpdatedOn(v) => v.is_some_and(|ts| issue.updated_on == ts),
            Self::Unknown(_) => false,
        }
    }
}

/// Parse a filter timestamp: RFC 3339, or a bare date meaning UTC midnight.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Filter options for listing issues (logical AND).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    pub fields: Vec<FieldFilter>,
}

impl ListFilters {
    /// Build filters from raw query pairs, keeping every pair.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(field, value)| FieldFilter::parse(field, value))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.fields.iter().all(|filter| filter.matches(issue))
    }
}
