//! In-process HTTP harness around the router.

use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use issue_tracker::{logging, server};
use serde_json::Value;
use tower::ServiceExt;
use tracker_lib::{InMemoryStore, fixture};

/// Fixture shaped like the `TEST_DATA` seed: the second and third issues are
/// closed and the second is titled `Title2`.
pub const TEST_DATA: &str = r#"[
  {"assigned_to":"","status_text":"","open":true,"_id":"8ab28b98","issue_title":"Title1","issue_text":"Text1","created_by":"alice","created_on":"2024-01-01T10:00:00.000Z","updated_on":"2024-01-01T10:00:00.000Z"},
  {"assigned_to":"bob","status_text":"Done","open":false,"_id":"5c0ffee5","issue_title":"Title2","issue_text":"Text2","created_by":"alice","created_on":"2024-01-02T10:00:00.000Z","updated_on":"2024-01-03T10:00:00.000Z"},
  {"assigned_to":"","status_text":"","open":false,"_id":"d00dfeed","issue_title":"Title3","issue_text":"Text3","created_by":"carol","created_on":"2024-01-04T10:00:00.000Z","updated_on":"2024-01-04T10:00:00.000Z"}
]"#;

pub struct TestApp {
    pub router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: Value,
}

impl TestApp {
    /// App with the `TEST_DATA` fixture loaded into project `test`.
    pub fn seeded() -> Self {
        let mut store = InMemoryStore::new();
        store
            .seed("test", fixture::parse(TEST_DATA).expect("parse fixture"))
            .expect("seed fixture");
        Self::with_store(store)
    }

    pub fn empty() -> Self {
        Self::with_store(InMemoryStore::new())
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        logging::init_test_logging();
        Self {
            router: server::router(server::shared(store)),
        }
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn json(&self, method: Method, uri: &str, body: &Value) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request");
        self.request(request).await
    }

    pub async fn form(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("build request");
        self.request(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        self.request(request).await
    }

    /// GET and return the ids in response order.
    pub async fn ids(&self, uri: &str) -> Vec<String> {
        let response = self.get(uri).await;
        response
            .body
            .as_array()
            .expect("array body")
            .iter()
            .map(|issue| issue["_id"].as_str().expect("string id").to_string())
            .collect()
    }
}

impl TestResponse {
    /// Assert the transport contract: 200 with a JSON body.
    pub fn assert_json_ok(&self) -> &Value {
        assert_eq!(self.status, StatusCode::OK);
        assert!(
            self.content_type.starts_with("application/json"),
            "unexpected content type {}",
            self.content_type
        );
        &self.body
    }
}
