//! Error types for the EBookStore domain.

use crate::identifiers::{AuthorId, BookId};
use crate::isbn::IsbnError;

/// Errors raised when a catalogue invariant would be violated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The ISBN failed parsing or checksum verification
    #[error("Invalid ISBN: {0}")]
    InvalidIsbn(#[from] IsbnError),

    /// No book with the given identifier
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    /// No author with the given identifier
    #[error("Author not found: {0}")]
    AuthorNotFound(AuthorId),

    /// Another book already uses this ISBN
    #[error("A book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    /// The author still owns books and cannot be removed
    #[error("Author {0} still has {1} book(s)")]
    AuthorHasBooks(AuthorId, u64),
}

impl DomainError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidIsbn(_) => "INVALID_ISBN",
            Self::BookNotFound(_) => "BOOK_NOT_FOUND",
            Self::AuthorNotFound(_) => "AUTHOR_NOT_FOUND",
            Self::DuplicateIsbn(_) => "DUPLICATE_ISBN",
            Self::AuthorHasBooks(..) => "AUTHOR_HAS_BOOKS",
        }
    }
}
