//! Book and author endpoints end to end over the in-memory store

mod common;

use axum::http::{header, Method, StatusCode};
use common::{admin_token, get, reader_token, request, send, test_state, CLEAN_CODE_ISBN};
use ebookstore_api_rest::AppState;
use ebookstore_common::config::Environment;
use ebookstore_infrastructure::Database;
use ebookstore_testing::{test_config, UnavailableCatalog};
use serde_json::{json, Value};
use std::sync::Arc;

async fn create_author(state: &AppState, name: &str) -> Value {
    let response = send(
        state,
        request(Method::POST, "/api/authors", Some(&admin_token()), Some(json!({ "name": name }))),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body
}

fn book_body(author_id: &Value, isbn: &str) -> Value {
    json!({
        "title": "Clean Code",
        "isbn": isbn,
        "published_year": 2008,
        "price": 37.99,
        "stock": 12,
        "author_id": author_id,
    })
}

#[tokio::test]
async fn test_book_lifecycle() {
    let state = test_state();
    let author = create_author(&state, "Robert C. Martin").await;

    let created = send(
        &state,
        request(
            Method::POST,
            "/api/books",
            Some(&admin_token()),
            Some(book_body(&author["id"], "978-0-13-235088-4")),
        ),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["isbn"], CLEAN_CODE_ISBN);
    assert_eq!(created.body["price"], 37.99);
    assert_eq!(created.body["author_name"], "Robert C. Martin");

    let id = created.body["id"].as_str().unwrap().to_string();
    assert_eq!(
        created.headers[header::LOCATION].to_str().unwrap(),
        format!("/api/books/{}", id)
    );

    let fetched = send(&state, get(&format!("/api/books/{}", id), Some(&reader_token()))).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["title"], "Clean Code");

    let mut replacement = book_body(&author["id"], CLEAN_CODE_ISBN);
    replacement["stock"] = json!(0);
    let updated = send(
        &state,
        request(Method::PUT, &format!("/api/books/{}", id), Some(&admin_token()), Some(replacement)),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["stock"], 0);

    let deleted = send(
        &state,
        request(Method::DELETE, &format!("/api/books/{}", id), Some(&admin_token()), None),
    )
    .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = send(&state, get(&format!("/api/books/{}", id), Some(&reader_token()))).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_book_is_unprocessable() {
    let state = test_state();
    let author = create_author(&state, "Martin Fowler").await;

    let response = send(
        &state,
        request(
            Method::POST,
            "/api/books",
            Some(&admin_token()),
            Some(json!({
                "title": "",
                "isbn": "978-0-13-235088-5",
                "published_year": 1200,
                "price": -1.0,
                "stock": -3,
                "author_id": author["id"],
            })),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = &response.body["details"]["field_errors"];
    for field in ["title", "isbn", "published_year", "price", "stock"] {
        assert!(fields[field].is_array(), "missing field error for {}", field);
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let state = test_state();
    let mut req = request(Method::POST, "/api/authors", Some(&admin_token()), None);
    req.headers_mut()
        .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
    *req.body_mut() = axum::body::Body::from("{\"name\": ");

    let response = send(&state, req).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_identifiers_are_bad_request() {
    let state = test_state();

    let response = send(&state, get("/api/books/not-a-uuid", Some(&reader_token()))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .starts_with("Bad request: Invalid path parameter"));

    let response = send(
        &state,
        request(Method::DELETE, "/api/authors/12345", Some(&admin_token()), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");

    let response = send(&state, get("/api/books?author_id=nope", Some(&reader_token()))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_author_is_unprocessable() {
    let state = test_state();

    let response = send(
        &state,
        request(
            Method::POST,
            "/api/books",
            Some(&admin_token()),
            Some(book_body(&json!(uuid::Uuid::now_v7()), CLEAN_CODE_ISBN)),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["details"]["field_errors"]["author_id"].is_array());
}

#[tokio::test]
async fn test_duplicate_isbn_conflicts() {
    let state = test_state();
    let author = create_author(&state, "Eric Evans").await;
    let body = book_body(&author["id"], CLEAN_CODE_ISBN);

    let first = send(&state, request(Method::POST, "/api/books", Some(&admin_token()), Some(body.clone()))).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = send(&state, request(Method::POST, "/api/books", Some(&admin_token()), Some(body))).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_author_with_books_cannot_be_deleted() {
    let state = test_state();
    let author = create_author(&state, "Robert C. Martin").await;
    let author_id = author["id"].as_str().unwrap().to_string();

    send(
        &state,
        request(
            Method::POST,
            "/api/books",
            Some(&admin_token()),
            Some(book_body(&author["id"], CLEAN_CODE_ISBN)),
        ),
    )
    .await;

    let books = send(&state, get(&format!("/api/authors/{}/books", author_id), Some(&reader_token()))).await;
    assert_eq!(books.body.as_array().unwrap().len(), 1);

    let filtered = send(&state, get(&format!("/api/books?author_id={}", author_id), Some(&reader_token()))).await;
    assert_eq!(filtered.body.as_array().unwrap().len(), 1);

    let fetched = send(&state, get(&format!("/api/authors/{}", author_id), Some(&reader_token()))).await;
    assert_eq!(fetched.body["book_count"], 1);

    let response = send(
        &state,
        request(Method::DELETE, &format!("/api/authors/{}", author_id), Some(&admin_token()), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_author_validates_payload() {
    let state = test_state();
    let author = create_author(&state, "Kent Beck").await;
    let path = format!("/api/authors/{}", author["id"].as_str().unwrap());

    let invalid = send(
        &state,
        request(Method::PUT, &path, Some(&admin_token()), Some(json!({ "name": "" }))),
    )
    .await;
    assert_eq!(invalid.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(invalid.body["details"]["field_errors"]["name"].is_array());

    let valid = send(
        &state,
        request(
            Method::PUT,
            &path,
            Some(&admin_token()),
            Some(json!({ "name": "Kent Beck", "birth_year": 1961 })),
        ),
    )
    .await;
    assert_eq!(valid.status, StatusCode::OK);
    assert_eq!(valid.body["birth_year"], 1961);
}

#[tokio::test]
async fn test_external_lookup() {
    let state = test_state();

    let found = send(
        &state,
        get("/api/books/external/978-0-13-235088-4", Some(&reader_token())),
    )
    .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["title"], "Clean Code");
    assert_eq!(found.body["isbn"], CLEAN_CODE_ISBN);

    let unknown = send(&state, get("/api/books/external/9780137081073", Some(&reader_token()))).await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let invalid = send(&state, get("/api/books/external/12345", Some(&reader_token()))).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_external_catalogue_outage_is_service_unavailable() {
    let state = AppState::with_catalog(
        test_config(Environment::Production),
        Database::in_memory(),
        Arc::new(UnavailableCatalog),
    );

    let response = send(
        &state,
        get(&format!("/api/books/external/{}", CLEAN_CODE_ISBN), Some(&reader_token())),
    )
    .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_readiness_with_in_memory_store() {
    let state = test_state();

    let response = send(&state, get("/ready", None)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["checks"]["backend"], "memory");
}
