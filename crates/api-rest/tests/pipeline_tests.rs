//! Middleware ordering: HTTPS redirection, authentication, authorization

mod common;

use axum::http::{header, Method, StatusCode};
use common::{admin_token, get, reader_token, request, send, state_for, test_state};
use ebookstore_api_rest::{AccessPolicy, AccessRule, AppState, Requirement};
use ebookstore_common::config::Environment;
use ebookstore_infrastructure::Database;
use ebookstore_testing::{test_config, StaticCatalog};
use serde_json::json;
use std::sync::Arc;

fn https_state(https_port: u16) -> AppState {
    let mut config = test_config(Environment::Production);
    config.server.https_port = Some(https_port);
    AppState::with_catalog(config, Database::in_memory(), Arc::new(StaticCatalog::new()))
}

#[tokio::test]
async fn test_plain_http_is_redirected_before_authentication() {
    let state = https_state(8443);

    let response = send(&state, get("/api/books?author_id=1", None)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers[header::LOCATION],
        "https://localhost:8443/api/books?author_id=1"
    );
    assert_eq!(state.metrics.decisions(), 0);
}

#[tokio::test]
async fn test_forwarded_https_reaches_authentication() {
    let state = https_state(443);
    let mut req = get("/api/books", None);
    req.headers_mut()
        .insert("x-forwarded-proto", "https".parse().unwrap());

    let response = send(&state, req).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_anonymous_routes_are_redirected_too() {
    let state = https_state(443);

    let response = send(&state, get("/health", None)).await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers[header::LOCATION], "https://localhost/health");
}

#[tokio::test]
async fn test_no_redirect_without_https_port() {
    let state = test_state();

    let response = send(&state, get("/health", None)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden() {
    let state = test_state();

    let response = send(
        &state,
        request(
            Method::POST,
            "/api/authors",
            Some(&reader_token()),
            Some(json!({ "name": "Kent Beck" })),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
    assert_eq!(state.metrics.denied(), 1);
    assert_eq!(state.metrics.granted(), 0);
}

#[tokio::test]
async fn test_admin_role_is_granted() {
    let state = test_state();

    let response = send(
        &state,
        request(
            Method::POST,
            "/api/authors",
            Some(&admin_token()),
            Some(json!({ "name": "Kent Beck" })),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(state.metrics.granted(), 1);
}

#[tokio::test]
async fn test_custom_access_table() {
    let state = test_state().with_policy(AccessPolicy::new(vec![AccessRule::new(
        Some(Method::GET),
        "/api/books",
        Requirement::Anonymous,
    )]));

    let open = send(&state, get("/api/books", None)).await;
    assert_eq!(open.status, StatusCode::OK);

    let closed = send(&state, get("/api/authors", None)).await;
    assert_eq!(closed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let state = state_for(Environment::Production);
    let mut req = get("/health", None);
    req.headers_mut()
        .insert("x-request-id", "req-123".parse().unwrap());

    let response = send(&state, req).await;
    assert_eq!(response.headers["x-request-id"], "req-123");

    let generated = send(&state, get("/health", None)).await;
    assert!(!generated.headers["x-request-id"].is_empty());
}

#[tokio::test]
async fn test_unknown_route_requires_authentication() {
    let state = test_state();

    let anonymous = send(&state, get("/nowhere", None)).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let authenticated = send(&state, get("/nowhere", Some(&reader_token()))).await;
    assert_eq!(authenticated.status, StatusCode::NOT_FOUND);
}
