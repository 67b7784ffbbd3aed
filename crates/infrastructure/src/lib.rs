//! Infrastructure layer for the EBookStore API
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx, or an in-memory store)
//! - Repository implementations of the application ports
//! - The startup database seeder
//! - The external book catalogue client (Open Library over reqwest)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ebookstore_infrastructure::database::{Database, DatabaseConfig};
//!
//! let database = Database::connect("postgres://localhost/ebookstore", &DatabaseConfig::default())?;
//! let ctx = database.scope();
//! let authors = ctx.authors.list().await?;
//! ```

pub mod database;
pub mod external_books;
pub mod repositories;
pub mod seed;

// Re-export commonly used types
pub use database::{Database, DatabaseConfig, DatabasePool, HealthStatus};
pub use external_books::OpenLibraryCatalog;
pub use repositories::{
    InMemoryAuthorRepository, InMemoryBookRepository, InMemoryStore, PgAuthorRepository,
    PgBookRepository,
};
pub use seed::{DatabaseSeeder, DbInitializer, SeedOutcome};

use ebookstore_application::ApplicationError;

// Re-export result and error types
pub type Result<T> = std::result::Result<T, Error>;

/// Postgres SQLSTATE for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be converted back into a domain value
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness or reference constraint was violated
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Outbound HTTP errors
    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Http(_))
    }

    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Constraint(_) => 409,
            Error::Configuration(_) | Error::InvalidData(_) => 500,
            Error::Database(_) | Error::Http(_) => 503,
        }
    }

    /// Classify a sqlx error, surfacing constraint violations separately
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => {
                    return Error::Constraint(db_err.message().to_string());
                }
                _ => {}
            }
        }
        Error::Database(err)
    }
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApplicationError::NotFound(msg),
            Error::Constraint(msg) => ApplicationError::Conflict(msg),
            Error::Database(sqlx::Error::PoolTimedOut) => {
                ApplicationError::Timeout("Timed out acquiring a database connection".to_string())
            }
            Error::Database(e) => ApplicationError::ServiceUnavailable(e.to_string()),
            Error::Http(msg) => ApplicationError::ServiceUnavailable(msg),
            Error::InvalidData(msg) | Error::Configuration(msg) => ApplicationError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let db_err = Error::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let not_found = Error::NotFound("test".to_string());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_error_http_status() {
        assert_eq!(Error::NotFound("test".to_string()).http_status(), 404);
        assert_eq!(Error::Constraint("dup".to_string()).http_status(), 409);
        assert_eq!(Error::Database(sqlx::Error::PoolClosed).http_status(), 503);
    }

    #[test]
    fn test_conversion_to_application_error() {
        let err: ApplicationError = Error::Constraint("books_isbn_key".to_string()).into();
        assert_eq!(err.http_status(), 409);

        let err: ApplicationError = Error::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.http_status(), 504);

        let err: ApplicationError = Error::Database(sqlx::Error::PoolClosed).into();
        assert_eq!(err.http_status(), 503);
    }
}
