//! Book Service
//!
//! CRUD operations over the book catalogue. Created per request over a
//! [`DataContext`].

use crate::dto::{BookDto, CreateBookDto, UpdateBookDto};
use crate::mapping::book_to_dto;
use crate::ports::DataContext;
use crate::validation::ValidationResult;
use crate::{ApplicationError, ApplicationResult};
use ebookstore_domain::{Author, AuthorId, Book, BookId, DomainError, NewBook};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Book service implementation
pub struct BookService {
    ctx: DataContext,
}

impl BookService {
    pub fn new(ctx: DataContext) -> Self {
        Self { ctx }
    }

    /// List books, optionally filtered by author
    #[instrument(skip(self))]
    pub async fn list(&self, author_id: Option<AuthorId>) -> ApplicationResult<Vec<BookDto>> {
        let books = self.ctx.books.list(author_id).await?;
        let authors: HashMap<AuthorId, Author> = self
            .ctx
            .authors
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        debug!(count = books.len(), "Listed books");

        Ok(books
            .iter()
            .map(|book| book_to_dto(book, authors.get(&book.author_id)))
            .collect())
    }

    /// Books written by one author; 404 when the author does not exist
    #[instrument(skip(self))]
    pub async fn list_by_author(&self, author_id: AuthorId) -> ApplicationResult<Vec<BookDto>> {
        let author = self
            .ctx
            .authors
            .get(author_id)
            .await?
            .ok_or(DomainError::AuthorNotFound(author_id))?;

        let books = self.ctx.books.list(Some(author_id)).await?;

        Ok(books
            .iter()
            .map(|book| book_to_dto(book, Some(&author)))
            .collect())
    }

    /// Get a single book
    #[instrument(skip(self))]
    pub async fn get(&self, id: BookId) -> ApplicationResult<BookDto> {
        let book = self.load(id).await?;
        let author = self.ctx.authors.get(book.author_id).await?;
        Ok(book_to_dto(&book, author.as_ref()))
    }

    /// Create a new book
    #[instrument(skip(self, request), fields(isbn = %request.isbn))]
    pub async fn create(&self, request: CreateBookDto) -> ApplicationResult<BookDto> {
        let data = NewBook::try_from(request)?;
        let author = self.require_author(data.author_id).await?;
        self.ensure_isbn_available(&data, None).await?;

        let book = Book::create(data);
        self.ctx.books.insert(&book).await?;

        info!(book_id = %book.id, "Book created");

        Ok(book_to_dto(&book, Some(&author)))
    }

    /// Replace an existing book
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: BookId, request: UpdateBookDto) -> ApplicationResult<BookDto> {
        let data = NewBook::try_from(request)?;
        let mut book = self.load(id).await?;
        let author = self.require_author(data.author_id).await?;
        self.ensure_isbn_available(&data, Some(id)).await?;

        book.apply(data);
        if !self.ctx.books.update(&book).await? {
            return Err(DomainError::BookNotFound(id).into());
        }

        info!(book_id = %book.id, "Book updated");

        Ok(book_to_dto(&book, Some(&author)))
    }

    /// Delete a book
    #[instrument(skip(self))]
    pub async fn delete(&self, id: BookId) -> ApplicationResult<()> {
        if !self.ctx.books.delete(id).await? {
            return Err(DomainError::BookNotFound(id).into());
        }

        info!(book_id = %id, "Book deleted");
        Ok(())
    }

    async fn load(&self, id: BookId) -> ApplicationResult<Book> {
        self.ctx
            .books
            .get(id)
            .await?
            .ok_or_else(|| DomainError::BookNotFound(id).into())
    }

    /// An unknown author is a field error on the request, not a 404
    async fn require_author(&self, author_id: AuthorId) -> ApplicationResult<Author> {
        match self.ctx.authors.get(author_id).await? {
            Some(author) => Ok(author),
            None => {
                let mut result = ValidationResult::success();
                result.add_field_error("author_id", format!("Author {} does not exist", author_id));
                Err(ApplicationError::InvalidFields(result))
            }
        }
    }

    async fn ensure_isbn_available(
        &self,
        data: &NewBook,
        current: Option<BookId>,
    ) -> ApplicationResult<()> {
        match self.ctx.books.find_by_isbn(&data.isbn).await? {
            Some(existing) if Some(existing.id) != current => {
                Err(DomainError::DuplicateIsbn(data.isbn.to_string()).into())
            }
            _ => Ok(()),
        }
    }
}
