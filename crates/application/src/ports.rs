//! Ports implemented by the infrastructure layer.
//!
//! Services never see a connection pool. They receive a [`DataContext`]
//! holding repository handles for one scope (a request or the startup seeder).

use crate::ApplicationResult;
use async_trait::async_trait;
use ebookstore_domain::{Author, AuthorId, Book, BookId, Isbn};
use std::sync::Arc;

/// Book repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// All books, optionally restricted to one author, ordered by title
    async fn list(&self, author_id: Option<AuthorId>) -> ApplicationResult<Vec<Book>>;
    async fn get(&self, id: BookId) -> ApplicationResult<Option<Book>>;
    async fn find_by_isbn(&self, isbn: &Isbn) -> ApplicationResult<Option<Book>>;
    async fn insert(&self, book: &Book) -> ApplicationResult<()>;
    /// Returns false when no row matched
    async fn update(&self, book: &Book) -> ApplicationResult<bool>;
    /// Returns false when no row matched
    async fn delete(&self, id: BookId) -> ApplicationResult<bool>;
    async fn count_by_author(&self, author_id: AuthorId) -> ApplicationResult<u64>;
}

/// Author repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    /// All authors ordered by name
    async fn list(&self) -> ApplicationResult<Vec<Author>>;
    async fn get(&self, id: AuthorId) -> ApplicationResult<Option<Author>>;
    async fn insert(&self, author: &Author) -> ApplicationResult<()>;
    /// Returns false when no row matched
    async fn update(&self, author: &Author) -> ApplicationResult<bool>;
    /// Returns false when no row matched
    async fn delete(&self, id: AuthorId) -> ApplicationResult<bool>;
    async fn count(&self) -> ApplicationResult<u64>;
}

/// Raw record returned by an external book catalogue
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogEntry {
    pub title: String,
    pub publish_date: Option<String>,
    pub number_of_pages: Option<u32>,
    pub publishers: Vec<String>,
}

/// External book catalogue (to be implemented by infrastructure)
#[async_trait]
pub trait BookCatalogPort: Send + Sync {
    /// `Ok(None)` when the catalogue has no entry for the ISBN
    async fn find_by_isbn(&self, isbn: &Isbn) -> ApplicationResult<Option<CatalogEntry>>;
}

/// Repository handles for one unit of work
#[derive(Clone)]
pub struct DataContext {
    pub books: Arc<dyn BookRepositoryPort>,
    pub authors: Arc<dyn AuthorRepositoryPort>,
}

impl DataContext {
    pub fn new(books: Arc<dyn BookRepositoryPort>, authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { books, authors }
    }
}

impl std::fmt::Debug for DataContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataContext").finish_non_exhaustive()
    }
}
