//! Test fixtures for domain entities and configuration.

use ebookstore_common::config::{AppConfig, Environment};
use ebookstore_domain::{Author, AuthorId, Book, Isbn, NewAuthor, NewBook};
use fake::{
    faker::{lorem::en::Sentence, name::en::Name},
    Fake,
};

/// Signing key shared by test configurations and test tokens
pub const TEST_JWT_KEY: &str = "test-signing-key-that-is-long-enough-for-hs256";
/// Issuer shared by test configurations and test tokens
pub const TEST_ISSUER: &str = "https://tests.ebookstore.local";
/// Audience shared by test configurations and test tokens
pub const TEST_AUDIENCE: &str = "ebookstore-tests";

/// ISBNs with valid checksums, usable in any order
pub const VALID_ISBNS: [&str; 6] = [
    "9780132350884",
    "9780137081073",
    "9780134757599",
    "9780321127426",
    "9780321125217",
    "0306406152",
];

/// In-memory configuration for `environment` using the test JWT settings
pub fn test_config(environment: Environment) -> AppConfig {
    let mut config = AppConfig::development();
    config.environment = environment;
    config.connection_strings.default_connection = "memory://tests".to_string();
    config.jwt_settings.key = TEST_JWT_KEY.to_string();
    config.jwt_settings.issuer = TEST_ISSUER.to_string();
    config.jwt_settings.audience = TEST_AUDIENCE.to_string();
    config
}

/// Create a test author with a random name
pub fn create_test_author() -> Author {
    Author::create(NewAuthor {
        name: Name().fake(),
        biography: Some(Sentence(3..8).fake()),
        birth_year: Some((1900..2000).fake()),
    })
}

/// Create a test book for `author_id` using one of [`VALID_ISBNS`]
pub fn create_test_book(author_id: AuthorId, isbn_index: usize) -> Book {
    Book::create(NewBook {
        title: Sentence(2..5).fake(),
        isbn: test_isbn(isbn_index),
        published_year: (1950..2020).fake(),
        price_cents: (100..10_000).fake(),
        stock: (0..50).fake(),
        author_id,
    })
}

/// A valid ISBN, cycling through [`VALID_ISBNS`]
pub fn test_isbn(index: usize) -> Isbn {
    Isbn::parse(VALID_ISBNS[index % VALID_ISBNS.len()]).expect("fixture ISBNs are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_isbns_parse() {
        for i in 0..VALID_ISBNS.len() {
            test_isbn(i);
        }
    }

    #[test]
    fn test_config_is_valid() {
        assert!(test_config(Environment::Production).validate().is_ok());
    }
}
