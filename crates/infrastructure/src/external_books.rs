//! Open Library catalogue adapter.
//!
//! Implements [`BookCatalogPort`] over `GET {base_url}/isbn/{isbn}.json`.
//! Transport errors and 5xx responses are retried with exponential backoff;
//! a 404 means the catalogue has no entry.

use async_trait::async_trait;
use ebookstore_application::{ApplicationError, ApplicationResult, BookCatalogPort, CatalogEntry};
use ebookstore_common::config::ExternalBooksConfig;
use ebookstore_common::retry::{retry_if, RetryPolicy};
use ebookstore_domain::Isbn;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{Error, Result};

/// Edition record as returned by Open Library
#[derive(Debug, Deserialize)]
struct Edition {
    title: String,
    #[serde(default)]
    publish_date: Option<String>,
    #[serde(default)]
    number_of_pages: Option<u32>,
    #[serde(default)]
    publishers: Vec<String>,
}

impl From<Edition> for CatalogEntry {
    fn from(edition: Edition) -> Self {
        CatalogEntry {
            title: edition.title,
            publish_date: edition.publish_date,
            number_of_pages: edition.number_of_pages,
            publishers: edition.publishers,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("catalogue has no entry")]
    NotFound,

    #[error("{0}")]
    Transient(String),

    #[error("{0}")]
    Permanent(String),
}

impl FetchError {
    fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient(_))
    }
}

/// HTTP client for the Open Library catalogue
#[derive(Debug, Clone)]
pub struct OpenLibraryCatalog {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenLibraryCatalog {
    /// Build a client with the configured timeout and retry count.
    pub fn new(config: &ExternalBooksConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("ebookstore-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::exponential(config.max_retries),
        })
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch(&self, url: &str) -> std::result::Result<CatalogEntry, FetchError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }

        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::Transient(format!(
                "catalogue responded with {}",
                status
            )));
        }

        if !status.is_success() {
            return Err(FetchError::Permanent(format!(
                "catalogue responded with {}",
                status
            )));
        }

        let edition: Edition = response
            .json()
            .await
            .map_err(|e| FetchError::Permanent(format!("invalid catalogue payload: {}", e)))?;

        Ok(edition.into())
    }
}

#[async_trait]
impl BookCatalogPort for OpenLibraryCatalog {
    #[instrument(skip(self), fields(isbn = %isbn))]
    async fn find_by_isbn(&self, isbn: &Isbn) -> ApplicationResult<Option<CatalogEntry>> {
        let url = format!("{}/isbn/{}.json", self.base_url, isbn);

        match retry_if(&self.retry, || self.fetch(&url), FetchError::is_transient).await {
            Ok(entry) => {
                debug!("Catalogue lookup succeeded");
                Ok(Some(entry))
            }
            Err(FetchError::NotFound) => Ok(None),
            Err(err) => {
                warn!(error = %err, "Catalogue lookup failed");
                Err(ApplicationError::ServiceUnavailable(format!(
                    "External book catalogue unavailable: {}",
                    err
                )))
            }
        }
    }
}
