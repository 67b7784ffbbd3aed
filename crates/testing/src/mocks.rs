//! Mock implementations of the outbound ports.

use async_trait::async_trait;
use ebookstore_application::{ApplicationError, ApplicationResult, BookCatalogPort, CatalogEntry};
use ebookstore_domain::Isbn;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Catalogue answering from a fixed map and counting lookups
#[derive(Default)]
pub struct StaticCatalog {
    entries: RwLock<HashMap<String, CatalogEntry>>,
    lookups: AtomicU32,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, isbn: &str, entry: CatalogEntry) -> Self {
        let key = Isbn::parse(isbn)
            .map(|i| i.to_string())
            .unwrap_or_else(|_| isbn.to_string());
        self.entries.write().insert(key, entry);
        self
    }

    pub fn lookup_count(&self) -> u32 {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookCatalogPort for StaticCatalog {
    async fn find_by_isbn(&self, isbn: &Isbn) -> ApplicationResult<Option<CatalogEntry>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.read().get(isbn.as_str()).cloned())
    }
}

/// Catalogue that is always unavailable
#[derive(Debug, Default)]
pub struct UnavailableCatalog;

#[async_trait]
impl BookCatalogPort for UnavailableCatalog {
    async fn find_by_isbn(&self, _isbn: &Isbn) -> ApplicationResult<Option<CatalogEntry>> {
        Err(ApplicationError::ServiceUnavailable(
            "catalogue unavailable".to_string(),
        ))
    }
}

/// Sample catalogue record
pub fn sample_catalog_entry(title: &str) -> CatalogEntry {
    CatalogEntry {
        title: title.to_string(),
        publish_date: Some("2008".to_string()),
        number_of_pages: Some(464),
        publishers: vec!["Prentice Hall".to_string()],
    }
}
