//! Book validation rules

use super::{check_not_future, Validatable, ValidationResult, ValidatorExt};
use crate::dto::{CreateBookDto, UpdateBookDto};

impl Validatable for CreateBookDto {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        check_not_future(&mut result, "published_year", self.published_year);
        result
    }
}

impl Validatable for UpdateBookDto {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();
        check_not_future(&mut result, "published_year", self.published_year);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::current_year;
    use uuid::Uuid;

    fn valid_book() -> CreateBookDto {
        CreateBookDto {
            title: "Clean Code".to_string(),
            isbn: "978-0-13-235088-4".to_string(),
            published_year: 2008,
            price: 37.99,
            stock: 10,
            author_id: Uuid::now_v7(),
        }
    }

    #[test]
    fn test_valid_book_passes() {
        assert!(valid_book().validate_all().valid);
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut book = valid_book();
        book.title = String::new();
        let result = book.validate_all();
        assert!(result.field_errors.contains_key("title"));
    }

    #[test]
    fn test_long_title_rejected() {
        let mut book = valid_book();
        book.title = "x".repeat(201);
        assert!(!book.validate_all().valid);
    }

    #[test]
    fn test_bad_isbn_checksum_rejected() {
        let mut book = valid_book();
        book.isbn = "978-0-13-235088-5".to_string();
        let result = book.validate_all();
        assert_eq!(result.field_errors.len(), 1);
        assert!(result.field_errors.contains_key("isbn"));
    }

    #[test]
    fn test_year_bounds() {
        let mut book = valid_book();
        book.published_year = 1449;
        assert!(book.validate_all().field_errors.contains_key("published_year"));

        book.published_year = current_year() + 1;
        assert!(book.validate_all().field_errors.contains_key("published_year"));

        book.published_year = 1450;
        assert!(book.validate_all().valid);
    }

    #[test]
    fn test_price_and_stock_bounds() {
        let mut book = valid_book();
        book.price = -0.01;
        book.stock = -1;
        let result = book.validate_all();
        assert!(result.field_errors.contains_key("price"));
        assert!(result.field_errors.contains_key("stock"));

        book.price = 10000.01;
        book.stock = 0;
        let result = book.validate_all();
        assert!(result.field_errors.contains_key("price"));
        assert!(!result.field_errors.contains_key("stock"));
    }

    #[test]
    fn test_update_uses_same_rules() {
        let update = UpdateBookDto {
            title: String::new(),
            isbn: "not-an-isbn".to_string(),
            published_year: 2000,
            price: 10.0,
            stock: 1,
            author_id: Uuid::now_v7(),
        };
        let result = update.validate_all();
        assert!(result.field_errors.contains_key("title"));
        assert!(result.field_errors.contains_key("isbn"));
    }
}
