//! Integration tests for the Open Library catalogue client
//!
//! Uses wiremock to stand in for the catalogue API.

use ebookstore_application::BookCatalogPort;
use ebookstore_common::config::ExternalBooksConfig;
use ebookstore_common::retry::RetryPolicy;
use ebookstore_domain::Isbn;
use ebookstore_infrastructure::OpenLibraryCatalog;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_for(server: &MockServer, max_retries: u32) -> OpenLibraryCatalog {
    let config = ExternalBooksConfig {
        base_url: server.uri(),
        timeout_seconds: 2,
        max_retries,
    };
    OpenLibraryCatalog::new(&config)
        .unwrap()
        .with_retry_policy(RetryPolicy::exponential(max_retries).with_initial_delay(Duration::from_millis(5)))
}

fn clean_code() -> Isbn {
    Isbn::parse("9780132350884").unwrap()
}

#[tokio::test]
async fn test_lookup_parses_edition() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/isbn/9780132350884.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Clean Code",
            "publish_date": "2008",
            "number_of_pages": 464,
            "publishers": ["Prentice Hall"],
            "key": "/books/OL1M"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let entry = catalog_for(&server, 2)
        .find_by_isbn(&clean_code())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(entry.title, "Clean Code");
    assert_eq!(entry.number_of_pages, Some(464));
    assert_eq!(entry.publishers, vec!["Prentice Hall".to_string()]);
}

#[tokio::test]
async fn test_missing_optional_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/isbn/9780132350884.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Clean Code" })))
        .mount(&server)
        .await;

    let entry = catalog_for(&server, 0)
        .find_by_isbn(&clean_code())
        .await
        .unwrap()
        .unwrap();

    assert!(entry.publish_date.is_none());
    assert!(entry.publishers.is_empty());
}

#[tokio::test]
async fn test_not_found_is_none_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = catalog_for(&server, 3).find_by_isbn(&clean_code()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_server_errors_are_retried_then_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let err = catalog_for(&server, 2)
        .find_by_isbn(&clean_code())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 503);
}

#[tokio::test]
async fn test_recovers_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Clean Code" })))
        .mount(&server)
        .await;

    let entry = catalog_for(&server, 2).find_by_isbn(&clean_code()).await.unwrap();
    assert!(entry.is_some());
}

#[tokio::test]
async fn test_slow_catalogue_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "title": "Clean Code" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ExternalBooksConfig {
        base_url: server.uri(),
        timeout_seconds: 1,
        max_retries: 0,
    };
    let catalog = OpenLibraryCatalog::new(&config).unwrap();

    let err = catalog.find_by_isbn(&clean_code()).await.unwrap_err();
    assert_eq!(err.http_status(), 503);
}

#[tokio::test]
async fn test_malformed_payload_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let err = catalog_for(&server, 2)
        .find_by_isbn(&clean_code())
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 503);
}
