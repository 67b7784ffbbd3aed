//! Swagger documentation is only mounted in development

mod common;

use axum::http::{header, StatusCode};
use common::{get, send, state_for};
use ebookstore_common::config::Environment;

const SWAGGER_PATHS: [&str; 3] = ["/swagger", "/swagger/v1/swagger.json", "/swagger-ui/"];

#[tokio::test]
async fn test_swagger_is_not_found_in_production() {
    let state = state_for(Environment::Production);

    for path in SWAGGER_PATHS {
        let response = send(&state, get(path, None)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn test_swagger_is_not_found_in_staging() {
    let state = state_for(Environment::Staging);

    let response = send(&state, get("/swagger/v1/swagger.json", None)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_in_development() {
    let state = state_for(Environment::Development);

    let response = send(&state, get("/swagger/v1/swagger.json", None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["info"]["title"], "EBookStore API");
    assert_eq!(response.body["info"]["version"], "v1");
    assert_eq!(response.body["info"]["contact"]["email"], "support@ebookstore.com");
    assert!(response.body["paths"]["/api/books/{id}"].is_object());
    assert!(response.body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

#[tokio::test]
async fn test_swagger_redirects_to_ui_in_development() {
    let state = state_for(Environment::Development);

    let response = send(&state, get("/swagger", None)).await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers[header::LOCATION], "/swagger-ui/");

    let ui = send(&state, get("/swagger-ui/", None)).await;
    assert_eq!(ui.status, StatusCode::OK);
}
