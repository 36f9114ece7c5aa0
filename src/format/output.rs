use serde::{Deserialize, Serialize};
use tracker_lib::TrackerError;

/// Success envelope for update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl ActionResult {
    #[must_use]
    pub fn updated(id: impl Into<String>) -> Self {
        Self {
            result: "successfully updated".to_string(),
            id: id.into(),
        }
    }

    #[must_use]
    pub fn deleted(id: impl Into<String>) -> Self {
        Self {
            result: "successfully deleted".to_string(),
            id: id.into(),
        }
    }
}

/// Error envelope. `_id` is present only when the request named an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl From<&TrackerError> for ErrorBody {
    fn from(err: &TrackerError) -> Self {
        Self {
            error: err.to_string(),
            id: err.issue_id().map(str::to_string),
        }
    }
}
