//! Book entity.

use crate::identifiers::{AuthorId, BookId};
use crate::isbn::Isbn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier
    pub id: BookId,
    /// Title
    pub title: String,
    /// Normalized ISBN
    pub isbn: Isbn,
    /// Year of first publication
    pub published_year: i32,
    /// Price in minor currency units (cents)
    pub price_cents: i64,
    /// Copies in stock
    pub stock: i32,
    /// Owning author
    pub author_id: AuthorId,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data required to create or replace a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    /// Title
    pub title: String,
    /// Normalized ISBN
    pub isbn: Isbn,
    /// Year of first publication
    pub published_year: i32,
    /// Price in cents
    pub price_cents: i64,
    /// Copies in stock
    pub stock: i32,
    /// Owning author
    pub author_id: AuthorId,
}

impl Book {
    /// Materialize a new book with a fresh identifier
    pub fn create(data: NewBook) -> Self {
        let now = Utc::now();
        Self {
            id: BookId::new(),
            title: data.title,
            isbn: data.isbn,
            published_year: data.published_year,
            price_cents: data.price_cents,
            stock: data.stock,
            author_id: data.author_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields and bump `updated_at`
    pub fn apply(&mut self, data: NewBook) {
        self.title = data.title;
        self.isbn = data.isbn;
        self.published_year = data.published_year;
        self.price_cents = data.price_cents;
        self.stock = data.stock;
        self.author_id = data.author_id;
        self.updated_at = Utc::now();
    }

    /// Whether at least one copy is available
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
