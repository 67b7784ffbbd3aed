//! Testing utilities for the EBookStore API
//!
//! This crate provides:
//! - Test fixtures for domain types and configuration
//! - Builder patterns for books, authors and request DTOs
//! - A bearer token minter with overridable claims
//! - A log capture writer for asserting on emitted events
//! - Mock catalogue implementations
//!
//! # Examples
//!
//! ```
//! use ebookstore_testing::{builders::*, tokens::TestTokenBuilder};
//!
//! let author = AuthorBuilder::new().with_name("Ada Lovelace").build();
//! let book = BookBuilder::new().with_author(author.id).build();
//! assert_eq!(book.author_id, author.id);
//!
//! let token = TestTokenBuilder::new().with_role("Admin").build();
//! assert_eq!(token.split('.').count(), 3);
//! ```

pub mod builders;
pub mod fixtures;
pub mod logs;
pub mod mocks;
pub mod tokens;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use logs::LogCapture;
pub use mocks::*;
pub use tokens::TestTokenBuilder;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
pub use wiremock;
