//! Mapping between domain entities and DTOs.
//!
//! Prices are stored as integer cents and exposed as decimal currency units.
//! Conversions that need to parse input (ISBNs) are fallible.

use crate::dto::{
    AuthorDto, BookDto, CreateAuthorDto, CreateBookDto, ExternalBookDto, UpdateAuthorDto,
    UpdateBookDto,
};
use crate::ports::CatalogEntry;
use ebookstore_domain::{Author, AuthorId, Book, DomainError, Isbn, NewAuthor, NewBook};

/// Convert a decimal price to cents, rounding half away from zero
pub fn price_to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Convert cents to a decimal price
pub fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Map a book, optionally with its author's name
pub fn book_to_dto(book: &Book, author: Option<&Author>) -> BookDto {
    BookDto {
        id: book.id.into_uuid(),
        title: book.title.clone(),
        isbn: book.isbn.to_string(),
        published_year: book.published_year,
        price: cents_to_price(book.price_cents),
        stock: book.stock,
        author_id: book.author_id.into_uuid(),
        author_name: author.map(|a| a.name.clone()),
    }
}

/// Map an author with the number of books they have in the catalogue
pub fn author_to_dto(author: &Author, book_count: u64) -> AuthorDto {
    AuthorDto {
        id: author.id.into_uuid(),
        name: author.name.clone(),
        biography: author.biography.clone(),
        birth_year: author.birth_year,
        book_count,
    }
}

/// Map a catalogue record to the public DTO
pub fn catalog_entry_to_dto(isbn: &Isbn, entry: CatalogEntry) -> ExternalBookDto {
    ExternalBookDto {
        isbn: isbn.to_string(),
        title: entry.title,
        publish_date: entry.publish_date,
        number_of_pages: entry.number_of_pages,
        publishers: entry.publishers,
    }
}

impl TryFrom<CreateBookDto> for NewBook {
    type Error = DomainError;

    fn try_from(dto: CreateBookDto) -> Result<Self, Self::Error> {
        Ok(NewBook {
            title: dto.title.trim().to_string(),
            isbn: Isbn::parse(&dto.isbn)?,
            published_year: dto.published_year,
            price_cents: price_to_cents(dto.price),
            stock: dto.stock,
            author_id: AuthorId::from_uuid(dto.author_id),
        })
    }
}

impl TryFrom<UpdateBookDto> for NewBook {
    type Error = DomainError;

    fn try_from(dto: UpdateBookDto) -> Result<Self, Self::Error> {
        Ok(NewBook {
            title: dto.title.trim().to_string(),
            isbn: Isbn::parse(&dto.isbn)?,
            published_year: dto.published_year,
            price_cents: price_to_cents(dto.price),
            stock: dto.stock,
            author_id: AuthorId::from_uuid(dto.author_id),
        })
    }
}

impl From<CreateAuthorDto> for NewAuthor {
    fn from(dto: CreateAuthorDto) -> Self {
        NewAuthor {
            name: dto.name.trim().to_string(),
            biography: dto.biography,
            birth_year: dto.birth_year,
        }
    }
}

impl From<UpdateAuthorDto> for NewAuthor {
    fn from(dto: UpdateAuthorDto) -> Self {
        NewAuthor {
            name: dto.name.trim().to_string(),
            biography: dto.biography,
            birth_year: dto.birth_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn create_dto(price: f64) -> CreateBookDto {
        CreateBookDto {
            title: "  Refactoring ".to_string(),
            isbn: "978-0-13-475759-9".to_string(),
            published_year: 2018,
            price,
            stock: 4,
            author_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn test_price_cents_round_trip() {
        for cents in [0_i64, 1, 99, 100, 1999, 4499, 999_999] {
            assert_eq!(price_to_cents(cents_to_price(cents)), cents);
        }
    }

    #[test]
    fn test_price_rounds_to_nearest_cent() {
        assert_eq!(price_to_cents(19.999), 2000);
        assert_eq!(price_to_cents(0.1 + 0.2), 30);
        assert_eq!(price_to_cents(12.344), 1234);
    }

    #[test]
    fn test_create_dto_maps_to_new_book() {
        let dto = create_dto(54.99);
        let author_id = dto.author_id;
        let book = NewBook::try_from(dto).unwrap();

        assert_eq!(book.title, "Refactoring");
        assert_eq!(book.isbn.as_str(), "9780134757599");
        assert_eq!(book.price_cents, 5499);
        assert_eq!(book.author_id.into_uuid(), author_id);
    }

    #[test]
    fn test_invalid_isbn_fails_mapping() {
        let mut dto = create_dto(1.0);
        dto.isbn = "123".to_string();
        assert!(matches!(
            NewBook::try_from(dto),
            Err(DomainError::InvalidIsbn(_))
        ));
    }

    #[test]
    fn test_book_to_dto_includes_author_name() {
        let author = Author::create(NewAuthor {
            name: "Martin Fowler".to_string(),
            biography: None,
            birth_year: Some(1963),
        });
        let mut new_book = NewBook::try_from(create_dto(54.99)).unwrap();
        new_book.author_id = author.id;
        let book = Book::create(new_book);

        let dto = book_to_dto(&book, Some(&author));
        assert_eq!(dto.id, book.id.into_uuid());
        assert_eq!(dto.price, 54.99);
        assert_eq!(dto.author_name.as_deref(), Some("Martin Fowler"));

        let anonymous = book_to_dto(&book, None);
        assert!(anonymous.author_name.is_none());
    }

    #[test]
    fn test_author_to_dto() {
        let author = Author::create(CreateAuthorDto {
            name: " Kent Beck ".to_string(),
            biography: Some("Extreme Programming".to_string()),
            birth_year: Some(1961),
        }
        .into());

        let dto = author_to_dto(&author, 3);
        assert_eq!(dto.name, "Kent Beck");
        assert_eq!(dto.book_count, 3);
    }
}
