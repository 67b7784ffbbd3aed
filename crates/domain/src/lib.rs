//! EBookStore Domain Types
//!
//! This crate provides the core domain model for the EBookStore API.
//! It defines the catalogue entities, their identifiers, and the errors
//! raised when domain invariants are violated.
//!
//! ## Architecture
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **author**: Authors and their biographical data
//! - **book**: Books, prices and stock
//! - **isbn**: ISBN-10 / ISBN-13 parsing and checksum verification
//! - **errors**: Domain error types
//!
//! ## Usage
//!
//! ```rust
//! use ebookstore_domain::{identifiers::AuthorId, isbn::Isbn};
//!
//! let author_id = AuthorId::new();
//! let isbn = Isbn::parse("978-0-13-235088-4").unwrap();
//! assert_eq!(isbn.as_str(), "9780132350884");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod author;
pub mod book;
pub mod errors;
pub mod identifiers;
pub mod isbn;

pub use author::{Author, NewAuthor};
pub use book::{Book, NewBook};
pub use errors::DomainError;
pub use identifiers::{AuthorId, BookId};
pub use isbn::Isbn;
