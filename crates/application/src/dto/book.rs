//! Book DTOs for API layer

use crate::validation::validate_isbn;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    /// Normalized ISBN (digits only)
    pub isbn: String,
    pub published_year: i32,
    /// Price in currency units
    pub price: f64,
    pub stock: i32,
    pub author_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

/// Create book request DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(custom(function = "validate_isbn"))]
    #[schema(example = "978-0-13-235088-4")]
    pub isbn: String,

    #[validate(range(min = 1450, message = "Published year must be 1450 or later"))]
    pub published_year: i32,

    #[validate(range(min = 0.0, max = 10000.0, message = "Price must be between 0 and 10000"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub author_id: Uuid,
}

/// Update book request DTO (full replacement)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBookDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(custom(function = "validate_isbn"))]
    pub isbn: String,

    #[validate(range(min = 1450, message = "Published year must be 1450 or later"))]
    pub published_year: i32,

    #[validate(range(min = 0.0, max = 10000.0, message = "Price must be between 0 and 10000"))]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    pub author_id: Uuid,
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Only return books by this author
    pub author_id: Option<Uuid>,
}
