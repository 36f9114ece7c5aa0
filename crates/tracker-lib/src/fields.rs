//! Field bags and the typed inputs built from them.
//!
//! The transport hands the store loosely typed key/value pairs. They are
//! converted here, once, into [`NewIssue`] and [`IssueUpdate`], where every
//! slot is `Some` only if the field was supplied with a non-empty value.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

/// Key carrying the issue id in request bodies.
pub const ID_KEY: &str = "_id";

/// Coerce a textual `open` value: only the literal `"false"` closes.
#[must_use]
pub fn parse_open(value: &str) -> bool {
    value != "false"
}

fn json_scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) if !is_zero(n) => n.to_string(),
        Value::Bool(false) | Value::Number(_) | Value::Null | Value::Array(_) | Value::Object(_) => {
            String::new()
        }
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_u64() == Some(0)
        || n.as_i64() == Some(0)
        || n.as_f64().is_some_and(|f| f.abs() < f64::MIN_POSITIVE)
}

/// Raw request fields, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBag {
    fields: BTreeMap<String, String>,
}

impl FieldBag {
    /// Build from ordered pairs. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build from a JSON object, normalizing scalars to text.
    ///
    /// Falsy values (`false`, `0`, `null`) become empty and so count as not
    /// supplied. `true` becomes `"true"` and other numbers their decimal form.
    /// Arrays and objects become empty.
    #[must_use]
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let fields = object
            .iter()
            .map(|(key, value)| (key.clone(), json_scalar_text(value)))
            .collect();
        Self { fields }
    }

    /// Value of `key` if present and non-empty.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn take(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    /// Keys carrying a value for which `is_known` is false.
    fn supplied_except(&self, is_known: impl Fn(&str) -> bool) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(key, value)| !value.is_empty() && !is_known(key.as_str()))
            .map(|(key, _)| key.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Input for creating an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
}

impl NewIssue {
    #[must_use]
    pub fn from_fields(fields: &FieldBag) -> Self {
        Self {
            issue_title: fields.take("issue_title"),
            issue_text: fields.take("issue_text"),
            created_by: fields.take("created_by"),
            assigned_to: fields.take("assigned_to"),
            status_text: fields.take("status_text"),
        }
    }
}

/// Fields an update may change.
const PATCHABLE: [&str; 6] = [
    "issue_title",
    "issue_text",
    "created_by",
    "assigned_to",
    "status_text",
    "open",
];

/// Partial update of one issue, addressed by `id`.
///
/// Immutable fields (`created_on`, `updated_on`) and unknown keys have no
/// slot and never reach the record. They are kept by name in `other_fields`
/// because a non-empty value still counts as a field sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    pub id: Option<String>,
    pub issue_title: Option<String>,
    pub issue_text: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub status_text: Option<String>,
    pub open: Option<bool>,
    pub other_fields: Vec<String>,
}

impl IssueUpdate {
    #[must_use]
    pub fn from_fields(fields: &FieldBag) -> Self {
        Self {
            id: fields.take(ID_KEY),
            issue_title: fields.take("issue_title"),
            issue_text: fields.take("issue_text"),
            created_by: fields.take("created_by"),
            assigned_to: fields.take("assigned_to"),
            status_text: fields.take("status_text"),
            open: fields.get("open").map(parse_open),
            other_fields: fields
                .supplied_except(|key| key == ID_KEY || PATCHABLE.contains(&key)),
        }
    }

    /// True when no key other than the id carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.changes_record() && self.other_fields.is_empty()
    }

    /// True when at least one patchable slot is set.
    #[must_use]
    pub const fn changes_record(&self) -> bool {
        self.issue_title.is_some()
            || self.issue_text.is_some()
            || self.created_by.is_some()
            || self.assigned_to.is_some()
            || self.status_text.is_some()
            || self.open.is_some()
    }
}
