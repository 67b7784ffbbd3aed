//! Shared helpers for router tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use ebookstore_api_rest::{build_router, AppState};
use ebookstore_common::config::Environment;
use ebookstore_infrastructure::Database;
use ebookstore_testing::{sample_catalog_entry, test_config, StaticCatalog, TestTokenBuilder};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const CLEAN_CODE_ISBN: &str = "9780132350884";

/// Production-environment state over an empty in-memory store
pub fn test_state() -> AppState {
    state_for(Environment::Production)
}

pub fn state_for(environment: Environment) -> AppState {
    let catalog = StaticCatalog::new().with_entry(CLEAN_CODE_ISBN, sample_catalog_entry("Clean Code"));
    AppState::with_catalog(
        test_config(environment),
        Database::in_memory(),
        Arc::new(catalog),
    )
}

pub fn reader_token() -> String {
    TestTokenBuilder::new().with_role("Reader").bearer()
}

pub fn admin_token() -> String {
    TestTokenBuilder::new().with_role("Admin").bearer()
}

pub fn request(method: Method, path: &str, authorization: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path).header(header::HOST, "localhost");

    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(path: &str, authorization: Option<&str>) -> Request<Body> {
    request(Method::GET, path, authorization, None)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send one request through a fresh router for `state`
pub async fn send(state: &AppState, req: Request<Body>) -> TestResponse {
    send_to(build_router(state.clone()), req).await
}

pub async fn send_to(router: Router, req: Request<Body>) -> TestResponse {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse { status, headers, body }
}

/// A port that was free a moment ago
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
