//! Author entity.

use crate::identifiers::AuthorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An author in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier
    pub id: AuthorId,
    /// Display name
    pub name: String,
    /// Optional short biography
    pub biography: Option<String>,
    /// Year of birth, if known
    pub birth_year: Option<i32>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data required to create an author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuthor {
    /// Display name
    pub name: String,
    /// Optional short biography
    pub biography: Option<String>,
    /// Year of birth, if known
    pub birth_year: Option<i32>,
}

impl Author {
    /// Materialize a new author with a fresh identifier
    pub fn create(data: NewAuthor) -> Self {
        let now = Utc::now();
        Self {
            id: AuthorId::new(),
            name: data.name,
            biography: data.biography,
            birth_year: data.birth_year,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the mutable fields and bump `updated_at`
    pub fn apply(&mut self, data: NewAuthor) {
        self.name = data.name;
        self.biography = data.biography;
        self.birth_year = data.birth_year;
        self.updated_at = Utc::now();
    }
}
