//! Fluent builder pattern for constructing test data.

use ebookstore_application::dto::{CreateAuthorDto, CreateBookDto, UpdateBookDto};
use ebookstore_domain::{Author, AuthorId, Book, Isbn, NewAuthor, NewBook};

use crate::fixtures::test_isbn;

/// Builder for creating Author test instances
#[derive(Clone)]
pub struct AuthorBuilder {
    name: String,
    biography: Option<String>,
    birth_year: Option<i32>,
}

impl AuthorBuilder {
    pub fn new() -> Self {
        Self {
            name: "Test Author".to_string(),
            biography: None,
            birth_year: Some(1970),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.biography = Some(biography.into());
        self
    }

    pub fn with_birth_year(mut self, year: Option<i32>) -> Self {
        self.birth_year = year;
        self
    }

    pub fn build(self) -> Author {
        Author::create(NewAuthor {
            name: self.name,
            biography: self.biography,
            birth_year: self.birth_year,
        })
    }

    /// Request body equivalent of this author
    pub fn build_dto(self) -> CreateAuthorDto {
        CreateAuthorDto {
            name: self.name,
            biography: self.biography,
            birth_year: self.birth_year,
        }
    }
}

impl Default for AuthorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating Book test instances
#[derive(Clone)]
pub struct BookBuilder {
    title: String,
    isbn: String,
    published_year: i32,
    price_cents: i64,
    stock: i32,
    author_id: AuthorId,
}

impl BookBuilder {
    pub fn new() -> Self {
        Self {
            title: "Test Book".to_string(),
            isbn: test_isbn(0).to_string(),
            published_year: 2008,
            price_cents: 2999,
            stock: 5,
            author_id: AuthorId::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Raw ISBN text; may be invalid when building request DTOs
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = isbn.into();
        self
    }

    pub fn with_published_year(mut self, year: i32) -> Self {
        self.published_year = year;
        self
    }

    pub fn with_price_cents(mut self, cents: i64) -> Self {
        self.price_cents = cents;
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_author(mut self, author_id: AuthorId) -> Self {
        self.author_id = author_id;
        self
    }

    /// Build the entity; panics if the ISBN is invalid
    pub fn build(self) -> Book {
        Book::create(NewBook {
            title: self.title,
            isbn: Isbn::parse(&self.isbn).expect("BookBuilder::build requires a valid ISBN"),
            published_year: self.published_year,
            price_cents: self.price_cents,
            stock: self.stock,
            author_id: self.author_id,
        })
    }

    /// Request body for creating this book
    pub fn build_create_dto(self) -> CreateBookDto {
        CreateBookDto {
            title: self.title,
            isbn: self.isbn,
            published_year: self.published_year,
            price: self.price_cents as f64 / 100.0,
            stock: self.stock,
            author_id: self.author_id.into_uuid(),
        }
    }

    /// Request body for replacing a book with these values
    pub fn build_update_dto(self) -> UpdateBookDto {
        UpdateBookDto {
            title: self.title,
            isbn: self.isbn,
            published_year: self.published_year,
            price: self.price_cents as f64 / 100.0,
            stock: self.stock,
            author_id: self.author_id.into_uuid(),
        }
    }
}

impl Default for BookBuilder {
    fn default() -> Self {
        Self::new()
    }
}
