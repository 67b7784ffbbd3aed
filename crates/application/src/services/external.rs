//! External Book Service
//!
//! Looks up book metadata in an external catalogue. Shared for the whole
//! process; the catalogue adapter owns the HTTP client.

use crate::dto::ExternalBookDto;
use crate::mapping::catalog_entry_to_dto;
use crate::ports::BookCatalogPort;
use crate::{ApplicationError, ApplicationResult};
use ebookstore_domain::Isbn;
use std::sync::Arc;
use tracing::{debug, instrument};

/// External catalogue lookups
#[derive(Clone)]
pub struct ExternalBookService {
    catalog: Arc<dyn BookCatalogPort>,
}

impl ExternalBookService {
    pub fn new(catalog: Arc<dyn BookCatalogPort>) -> Self {
        Self { catalog }
    }

    /// Fetch metadata for `isbn`
    #[instrument(skip(self))]
    pub async fn lookup(&self, isbn: &str) -> ApplicationResult<ExternalBookDto> {
        let isbn = Isbn::parse(isbn)
            .map_err(|err| ApplicationError::InvalidInput(format!("Invalid ISBN: {}", err)))?;

        match self.catalog.find_by_isbn(&isbn).await? {
            Some(entry) => {
                debug!(isbn = %isbn, "Catalogue entry found");
                Ok(catalog_entry_to_dto(&isbn, entry))
            }
            None => Err(ApplicationError::NotFound(format!(
                "No catalogue entry for ISBN {}",
                isbn
            ))),
        }
    }
}

impl std::fmt::Debug for ExternalBookService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalBookService").finish_non_exhaustive()
    }
}
