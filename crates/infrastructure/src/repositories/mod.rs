//! Repository implementations for the application ports.
//!
//! Each port has a PostgreSQL implementation (runtime-checked sqlx queries)
//! and an in-memory implementation over a shared [`InMemoryStore`].

mod author_repository;
mod book_repository;
mod memory;

pub use author_repository::{InMemoryAuthorRepository, PgAuthorRepository};
pub use book_repository::{InMemoryBookRepository, PgBookRepository};
pub use memory::InMemoryStore;

pub(crate) use author_repository::insert_author;
pub(crate) use book_repository::insert_book;
