mod common;

use axum::http::Method;
use chrono::{DateTime, Duration, Utc};
use common::http::{TEST_DATA, TestApp};
use serde_json::{Value, json};

fn parse_ts(value: &Value) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value.as_str().expect("timestamp string"))
        .expect("rfc3339 timestamp")
        .with_timezone(&Utc)
}

fn assert_recent(value: &Value) {
    let ts = parse_ts(value);
    assert!(ts >= Utc::now() - Duration::seconds(5), "{ts} is too old");
}

fn fixture() -> Vec<Value> {
    serde_json::from_str(TEST_DATA).unwrap()
}

#[tokio::test]
async fn create_issue_with_every_field() {
    let app = TestApp::empty();
    let response = app
        .json(
            Method::POST,
            "/api/issues/apitest",
            &json!({
                "assigned_to": "Them",
                "status_text": "Pending",
                "issue_title": "Title",
                "issue_text": "Text",
                "created_by": "author"
            }),
        )
        .await;

    let body = response.assert_json_ok();
    assert_eq!(body["assigned_to"], "Them");
    assert_eq!(body["status_text"], "Pending");
    assert_eq!(body["issue_title"], "Title");
    assert_eq!(body["issue_text"], "Text");
    assert_eq!(body["created_by"], "author");
    assert_eq!(body["open"], true);
    assert!(body["_id"].is_string());
    assert_recent(&body["created_on"]);
    assert_recent(&body["updated_on"]);
    assert_eq!(body["created_on"], body["updated_on"]);
}

#[tokio::test]
async fn create_issue_with_only_required_fields() {
    let app = TestApp::empty();
    let response = app
        .json(
            Method::POST,
            "/api/issues/apitest",
            &json!({
                "assigned_to": "",
                "status_text": "",
                "issue_title": "Title",
                "issue_text": "Text",
                "created_by": "author"
            }),
        )
        .await;

    let body = response.assert_json_ok();
    assert_eq!(body["assigned_to"], "");
    assert_eq!(body["status_text"], "");
    assert_eq!(body["open"], true);
    assert!(body["_id"].is_string());
}

#[tokio::test]
async fn create_issue_with_missing_required_fields() {
    let app = TestApp::seeded();
    let response = app
        .json(
            Method::POST,
            "/api/issues/test",
            &json!({
                "assigned_to": "",
                "status_text": "",
                "issue_title": "",
                "issue_text": "Text",
                "created_by": "author"
            }),
        )
        .await;

    assert_eq!(
        response.assert_json_ok(),
        &json!({"error": "required field(s) missing"})
    );
    assert_eq!(app.ids("/api/issues/test").await.len(), 3);
}

#[tokio::test]
async fn view_issues_on_a_project() {
    let app = TestApp::seeded();
    let response = app.get("/api/issues/test").await;
    assert_eq!(response.assert_json_ok(), &Value::Array(fixture()));
}

#[tokio::test]
async fn view_issues_with_one_filter() {
    let app = TestApp::seeded();
    let response = app.get("/api/issues/test?open=false").await;
    let expected = fixture();
    assert_eq!(
        response.assert_json_ok(),
        &json!([expected[1], expected[2]])
    );
}

#[tokio::test]
async fn view_issues_with_multiple_filters() {
    let app = TestApp::seeded();
    let response = app
        .get("/api/issues/test?open=false&issue_title=Title2")
        .await;
    assert_eq!(response.assert_json_ok(), &json!([fixture()[1]]));
}

#[tokio::test]
async fn update_one_field() {
    let app = TestApp::seeded();
    let response = app
        .json(
            Method::PUT,
            "/api/issues/test",
            &json!({"_id": "8ab28b98", "issue_text": "text is updated"}),
        )
        .await;
    assert_eq!(
        response.assert_json_ok(),
        &json!({"result": "successfully updated", "_id": "8ab28b98"})
    );

    let listed = app.get("/api/issues/test?_id=8ab28b98").await;
    let issue = &listed.body[0];
    let original = &fixture()[0];
    assert_eq!(issue["issue_text"], "text is updated");
    assert_eq!(issue["issue_title"], original["issue_title"]);
    assert_eq!(issue["created_on"], original["created_on"]);
    assert!(parse_ts(&issue["updated_on"]) > parse_ts(&original["updated_on"]));
}

#[tokio::test]
async fn update_multiple_fields() {
    let app = TestApp::seeded();
    let response = app
        .json(
            Method::PUT,
            "/api/issues/test",
            &json!({
                "_id": "8ab28b98",
                "issue_text": "text is updated",
                "assigned_to": "You",
                "status_text": "pending"
            }),
        )
        .await;
    assert_eq!(
        response.assert_json_ok(),
        &json!({"result": "successfully updated", "_id": "8ab28b98"})
    );

    let ids = app
        .ids("/api/issues/test?assigned_to=You&status_text=pending")
        .await;
    assert_eq!(ids, vec!["8ab28b98"]);
}

#[tokio::test]
async fn update_with_missing_id() {
    let app = TestApp::seeded();
    let response = app
        .json(
            Method::PUT,
            "/api/issues/test",
            &json!({"_id": "", "issue_text": "text is updated"}),
        )
        .await;
    assert_eq!(response.assert_json_ok(), &json!({"error": "missing _id"}));
}

#[tokio::test]
async fn update_with_no_fields() {
    let app = TestApp::seeded();
    let response = app
        .json(Method::PUT, "/api/issues/test", &json!({"_id": "8ab28b98"}))
        .await;
    assert_eq!(
        response.assert_json_ok(),
        &json!({"error": "no update field(s) sent", "_id": "8ab28b98"})
    );

    let listed = app.get("/api/issues/test?_id=8ab28b98").await;
    assert_eq!(listed.body[0]["updated_on"], fixture()[0]["updated_on"]);
}

#[tokio::test]
async fn update_with_invalid_id() {
    let app = TestApp::seeded();
    let response = app
        .json(
            Method::PUT,
            "/api/issues/test",
            &json!({"_id": "10", "issue_text": "text is updated"}),
        )
        .await;
    assert_eq!(
        response.assert_json_ok(),
        &json!({"error": "could not update", "_id": "10"})
    );
}

#[tokio::test]
async fn delete_an_issue() {
    let app = TestApp::seeded();
    let response = app
        .json(Method::DELETE, "/api/issues/test", &json!({"_id": "8ab28b98"}))
        .await;
    assert_eq!(
        response.assert_json_ok(),
        &json!({"result": "successfully deleted", "_id": "8ab28b98"})
    );
    assert_eq!(
        app.ids("/api/issues/test").await,
        vec!["5c0ffee5", "d00dfeed"]
    );
}

#[tokio::test]
async fn delete_with_invalid_id() {
    let app = TestApp::seeded();
    let response = app
        .json(Method::DELETE, "/api/issues/test", &json!({"_id": "10"}))
        .await;
    assert_eq!(
        response.assert_json_ok(),
        &json!({"error": "could not delete", "_id": "10"})
    );
    assert_eq!(app.ids("/api/issues/test").await.len(), 3);
}

#[tokio::test]
async fn delete_with_missing_id() {
    let app = TestApp::seeded();
    let response = app
        .json(Method::DELETE, "/api/issues/test", &json!({"_id": ""}))
        .await;
    assert_eq!(response.assert_json_ok(), &json!({"error": "missing _id"}));
}
