//! Application layer for the EBookStore API
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Architecture
//!
//! The application layer sits between the domain and infrastructure layers.
//! It owns the ports that infrastructure implements, so handlers only ever
//! talk to services built over a [`DataContext`].
//!
//! ## Modules
//!
//! - `services` - Use cases (BookService, AuthorService, ExternalBookService)
//! - `ports` - Repository and catalogue traits implemented by infrastructure
//! - `mapping` - Entity to DTO conversions
//! - `validation` - Input validation rule sets
//! - `dto` - Data transfer objects for the API layer

pub mod dto;
pub mod mapping;
pub mod ports;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use ports::{AuthorRepositoryPort, BookCatalogPort, BookRepositoryPort, CatalogEntry, DataContext};
pub use services::{AuthorService, BookService, ExternalBookService};
pub use validation::{Validatable, ValidationResult, ValidatorExt};

use ebookstore_domain::DomainError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Validation errors with field-level detail
    #[error("Validation failed: {}", .0.summary())]
    InvalidFields(ValidationResult),

    /// Resource conflict (e.g., duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// External service unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::Unauthorized(_) => 401,
            ApplicationError::Forbidden(_) => 403,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) | ApplicationError::InvalidFields(_) => 422,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
            ApplicationError::Timeout(_) => 504,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::ServiceUnavailable(_) | ApplicationError::Timeout(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::Unauthorized(_) => "UNAUTHORIZED",
            ApplicationError::Forbidden(_) => "FORBIDDEN",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) | ApplicationError::InvalidFields(_) => {
                "VALIDATION_FAILED"
            }
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApplicationError::Timeout(_) => "TIMEOUT",
        }
    }

    /// Field-level validation detail, if any
    pub fn field_errors(&self) -> Option<&ValidationResult> {
        match self {
            ApplicationError::InvalidFields(result) => Some(result),
            _ => None,
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidIsbn(_) => {
                let mut result = ValidationResult::success();
                result.add_field_error("isbn", err.to_string());
                ApplicationError::InvalidFields(result)
            }
            DomainError::BookNotFound(_) | DomainError::AuthorNotFound(_) => {
                ApplicationError::NotFound(err.to_string())
            }
            DomainError::DuplicateIsbn(_) | DomainError::AuthorHasBooks(..) => {
                ApplicationError::Conflict(err.to_string())
            }
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ebookstore_domain::{AuthorId, BookId};

    #[test]
    fn test_error_http_status() {
        assert_eq!(ApplicationError::NotFound("test".to_string()).http_status(), 404);
        assert_eq!(ApplicationError::Unauthorized("test".to_string()).http_status(), 401);
        assert_eq!(ApplicationError::Forbidden("test".to_string()).http_status(), 403);
        assert_eq!(ApplicationError::ValidationFailed("test".to_string()).http_status(), 422);
        assert_eq!(ApplicationError::Conflict("test".to_string()).http_status(), 409);
        assert_eq!(ApplicationError::Internal("test".to_string()).http_status(), 500);
        assert_eq!(ApplicationError::ServiceUnavailable("test".to_string()).http_status(), 503);
    }

    #[test]
    fn test_error_retryable() {
        assert!(ApplicationError::ServiceUnavailable("test".to_string()).is_retryable());
        assert!(ApplicationError::Timeout("test".to_string()).is_retryable());
        assert!(!ApplicationError::NotFound("test".to_string()).is_retryable());
        assert!(!ApplicationError::Forbidden("test".to_string()).is_retryable());
    }

    #[test]
    fn test_domain_errors_map_to_statuses() {
        let not_found: ApplicationError = DomainError::BookNotFound(BookId::new()).into();
        assert_eq!(not_found.http_status(), 404);

        let conflict: ApplicationError = DomainError::AuthorHasBooks(AuthorId::new(), 2).into();
        assert_eq!(conflict.http_status(), 409);

        let duplicate: ApplicationError = DomainError::DuplicateIsbn("9780132350884".into()).into();
        assert_eq!(duplicate.error_code(), "CONFLICT");
    }

    #[test]
    fn test_invalid_isbn_carries_field_detail() {
        let err: ApplicationError =
            DomainError::InvalidIsbn(ebookstore_domain::isbn::IsbnError::InvalidChecksum).into();
        assert_eq!(err.http_status(), 422);
        let fields = err.field_errors().unwrap();
        assert!(fields.field_errors.contains_key("isbn"));
    }
}
