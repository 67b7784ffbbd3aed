//! Author DTOs for API layer

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Author response DTO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    /// Number of books in the catalogue by this author
    pub book_count: u64,
}

/// Create author request DTO
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAuthorDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Biography must be 2000 characters or less"))]
    pub biography: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Birth year must be positive"))]
    pub birth_year: Option<i32>,
}

/// Update author request DTO (full replacement)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthorDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Biography must be 2000 characters or less"))]
    pub biography: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, message = "Birth year must be positive"))]
    pub birth_year: Option<i32>,
}
