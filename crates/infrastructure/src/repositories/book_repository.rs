//! Book repository implementations.
//!
//! PostgreSQL-backed and in-memory implementations of [`BookRepositoryPort`].

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgExecutor, PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use ebookstore_application::{ApplicationResult, BookRepositoryPort};
use ebookstore_domain::{AuthorId, Book, BookId, Isbn};

use super::memory::InMemoryStore;
use crate::{Error, Result};

const BOOK_COLUMNS: &str =
    "id, title, isbn, published_year, price_cents, stock, author_id, created_at, updated_at";

/// PostgreSQL implementation of BookRepositoryPort.
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    /// Create a new PostgreSQL book repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row to a Book.
fn row_to_book(row: PgRow) -> Result<Book> {
    let isbn: String = row.try_get("isbn").map_err(Error::Database)?;
    let id: Uuid = row.try_get("id").map_err(Error::Database)?;
    let author_id: Uuid = row.try_get("author_id").map_err(Error::Database)?;

    Ok(Book {
        id: BookId::from(id),
        title: row.try_get("title").map_err(Error::Database)?,
        isbn: Isbn::parse(&isbn)
            .map_err(|e| Error::InvalidData(format!("book {}: {}", id, e)))?,
        published_year: row.try_get("published_year").map_err(Error::Database)?,
        price_cents: row.try_get("price_cents").map_err(Error::Database)?,
        stock: row.try_get("stock").map_err(Error::Database)?,
        author_id: AuthorId::from(author_id),
        created_at: row.try_get("created_at").map_err(Error::Database)?,
        updated_at: row.try_get("updated_at").map_err(Error::Database)?,
    })
}

pub(crate) async fn insert_book<'e, E>(executor: E, book: &Book) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO books (
            id, title, isbn, published_year, price_cents,
            stock, author_id, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(book.id.into_uuid())
    .bind(&book.title)
    .bind(book.isbn.as_str())
    .bind(book.published_year)
    .bind(book.price_cents)
    .bind(book.stock)
    .bind(book.author_id.into_uuid())
    .bind(book.created_at)
    .bind(book.updated_at)
    .execute(executor)
    .await
    .map_err(Error::from_sqlx)?;

    Ok(())
}

impl PgBookRepository {
    async fn fetch_all(&self, author_id: Option<AuthorId>) -> Result<Vec<Book>> {
        let rows = match author_id {
            Some(author_id) => {
                sqlx::query(&format!(
                    "SELECT {} FROM books WHERE author_id = $1 ORDER BY title",
                    BOOK_COLUMNS
                ))
                .bind(author_id.into_uuid())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!("SELECT {} FROM books ORDER BY title", BOOK_COLUMNS))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(Error::Database)?;

        rows.into_iter().map(row_to_book).collect()
    }

    async fn fetch_one(&self, column: &str, value: impl AsRef<str>) -> Result<Option<Book>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM books WHERE {} = $1",
            BOOK_COLUMNS, column
        ))
        .bind(value.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.map(row_to_book).transpose()
    }
}

#[async_trait]
impl BookRepositoryPort for PgBookRepository {
    #[instrument(skip(self))]
    async fn list(&self, author_id: Option<AuthorId>) -> ApplicationResult<Vec<Book>> {
        Ok(self.fetch_all(author_id).await?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: BookId) -> ApplicationResult<Option<Book>> {
        let row = sqlx::query(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id.into_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.map(row_to_book).transpose()?)
    }

    #[instrument(skip(self))]
    async fn find_by_isbn(&self, isbn: &Isbn) -> ApplicationResult<Option<Book>> {
        Ok(self.fetch_one("isbn", isbn.as_str()).await?)
    }

    #[instrument(skip(self, book), fields(book_id = %book.id))]
    async fn insert(&self, book: &Book) -> ApplicationResult<()> {
        insert_book(&self.pool, book).await?;
        debug!("Book inserted");
        Ok(())
    }

    #[instrument(skip(self, book), fields(book_id = %book.id))]
    async fn update(&self, book: &Book) -> ApplicationResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, isbn = $3, published_year = $4, price_cents = $5,
                stock = $6, author_id = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(book.id.into_uuid())
        .bind(&book.title)
        .bind(book.isbn.as_str())
        .bind(book.published_year)
        .bind(book.price_cents)
        .bind(book.stock)
        .bind(book.author_id.into_uuid())
        .bind(book.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: BookId) -> ApplicationResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_author(&self, author_id: AuthorId) -> ApplicationResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id.into_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(count as u64)
    }
}

/// In-memory implementation of BookRepositoryPort.
pub struct InMemoryBookRepository {
    store: InMemoryStore,
}

impl InMemoryBookRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepositoryPort for InMemoryBookRepository {
    async fn list(&self, author_id: Option<AuthorId>) -> ApplicationResult<Vec<Book>> {
        let mut books: Vec<Book> = self.store.read(|t| {
            t.books
                .values()
                .filter(|b| author_id.map_or(true, |id| b.author_id == id))
                .cloned()
                .collect()
        });
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn get(&self, id: BookId) -> ApplicationResult<Option<Book>> {
        Ok(self.store.read(|t| t.books.get(&id).cloned()))
    }

    async fn find_by_isbn(&self, isbn: &Isbn) -> ApplicationResult<Option<Book>> {
        Ok(self
            .store
            .read(|t| t.books.values().find(|b| &b.isbn == isbn).cloned()))
    }

    async fn insert(&self, book: &Book) -> ApplicationResult<()> {
        self.store.write(|t| {
            if !t.authors.contains_key(&book.author_id) {
                return Err(Error::Constraint(format!(
                    "author {} does not exist",
                    book.author_id
                )));
            }
            if t.books.values().any(|b| b.isbn == book.isbn) {
                return Err(Error::Constraint(format!("duplicate isbn {}", book.isbn)));
            }
            t.books.insert(book.id, book.clone());
            Ok(())
        })?;
        Ok(())
    }

    async fn update(&self, book: &Book) -> ApplicationResult<bool> {
        let updated = self.store.write(|t| {
            if !t.books.contains_key(&book.id) {
                return Ok(false);
            }
            if t.books
                .values()
                .any(|b| b.id != book.id && b.isbn == book.isbn)
            {
                return Err(Error::Constraint(format!("duplicate isbn {}", book.isbn)));
            }
            t.books.insert(book.id, book.clone());
            Ok(true)
        })?;
        Ok(updated)
    }

    async fn delete(&self, id: BookId) -> ApplicationResult<bool> {
        Ok(self.store.write(|t| t.books.remove(&id).is_some()))
    }

    async fn count_by_author(&self, author_id: AuthorId) -> ApplicationResult<u64> {
        Ok(self.store.read(|t| {
            t.books
                .values()
                .filter(|b| b.author_id == author_id)
                .count() as u64
        }))
    }
}
