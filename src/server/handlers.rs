//! Route handlers for `/api/issues/{project}`.
//!
//! Every store outcome, including errors, is answered with 200 and a JSON
//! body.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use tracing::debug;
use tracker_lib::{Issue, IssueUpdate, ListFilters, NewIssue, TrackerError};

use super::SharedStore;
use super::extract::BodyFields;
use crate::format::{ActionResult, ErrorBody};

fn error_response(err: &TrackerError) -> Response {
    debug!(error = %err, kind = ?err.kind(), "Store declined request");
    Json(ErrorBody::from(err)).into_response()
}

/// `GET`: list the project's issues matching the query string.
pub async fn list_issues(
    State(store): State<SharedStore>,
    Path(project): Path<String>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<Vec<Issue>> {
    let Ok(Query(pairs)) = query else {
        debug!(project = %project, "Unreadable query string, no matches");
        return Json(Vec::new());
    };

    debug!(project = %project, filters = pairs.len(), "GET /api/issues");
    let filters = ListFilters::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let store = store.read().await;
    let issues = store
        .list_issues(&project, &filters)
        .into_iter()
        .cloned()
        .collect();
    Json(issues)
}

/// `POST`: create an issue.
pub async fn create_issue(
    State(store): State<SharedStore>,
    Path(project): Path<String>,
    BodyFields(fields): BodyFields,
) -> Response {
    debug!(project = %project, fields = fields.len(), "POST /api/issues");
    let new = NewIssue::from_fields(&fields);
    let result = store.write().await.create_issue(&project, &new);
    match result {
        Ok(issue) => Json(issue).into_response(),
        Err(err) => error_response(&err),
    }
}

/// `PUT`: patch an issue.
pub async fn update_issue(
    State(store): State<SharedStore>,
    Path(project): Path<String>,
    BodyFields(fields): BodyFields,
) -> Response {
    debug!(project = %project, fields = fields.len(), "PUT /api/issues");
    let update = IssueUpdate::from_fields(&fields);
    let result = store.write().await.update_issue(&project, &update);
    match result {
        Ok(id) => Json(ActionResult::updated(id)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// `DELETE`: remove an issue.
pub async fn delete_issue(
    State(store): State<SharedStore>,
    Path(project): Path<String>,
    BodyFields(fields): BodyFields,
) -> Response {
    debug!(project = %project, "DELETE /api/issues");
    let id = fields.get(tracker_lib::fields::ID_KEY);
    let result = store.write().await.delete_issue(&project, id);
    match result {
        Ok(id) => Json(ActionResult::deleted(id)).into_response(),
        Err(err) => error_response(&err),
    }
}
