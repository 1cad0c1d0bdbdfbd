//! Shared helpers for API integration tests: app construction with a
//! canned frame-rate probe, bearer-token forgery, and request plumbing.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use checker_core::probe::{FrameRateProbe, ProbeError};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use checker_api::config::ServerConfig;
use checker_api::router::build_app_router;
use checker_api::state::AppState;

/// A [`FrameRateProbe`] that always reports the same rate.
pub struct FixedRate(pub f64);

#[async_trait]
impl FrameRateProbe for FixedRate {
    async fn frame_rate(&self, _blob_ref: &str) -> Result<f64, ProbeError> {
        Ok(self.0)
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a probe that always reports 30 fps.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        probe: Arc::new(FixedRate(30.0)),
    };
    build_app_router(state, &config)
}

/// Forge a bearer token the claims decoder accepts. The upstream identity
/// provider verifies signatures before requests reach this service, so the
/// decoder only reads the payload segment.
pub fn token(subject: &str, is_admin: bool) -> String {
    let roles: Vec<&str> = if is_admin { vec!["task-admin"] } else { vec![] };
    let payload = serde_json::json!({
        "oid": subject,
        "name": format!("{subject} name"),
        "preferred_username": format!("{subject}@example.com"),
        "roles": roles,
    });
    format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

/// Issue a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a request with a bearer token and an optional JSON body.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    bearer: &str,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"));
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the parsed body in one step.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

pub const MULTIPART_BOUNDARY: &str = "test-boundary-7f3a";

/// Assemble a multipart/form-data body from text fields and file parts.
pub fn multipart_body(text_fields: &[(&str, &str)], files: &[(&str, &str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in text_fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    for (name, file_name, content) in files {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n{content}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    body
}

/// POST a multipart body with a bearer token.
pub async fn post_multipart(app: Router, uri: &str, bearer: &str, body: String) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}
