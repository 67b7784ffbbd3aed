//! Author repository implementations.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgExecutor, PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use ebookstore_application::{ApplicationResult, AuthorRepositoryPort};
use ebookstore_domain::{Author, AuthorId};

use super::memory::InMemoryStore;
use crate::{Error, Result};

/// PostgreSQL implementation of AuthorRepositoryPort.
pub struct PgAuthorRepository {
    pool: PgPool,
}

impl PgAuthorRepository {
    /// Create a new PostgreSQL author repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_author(row: PgRow) -> Result<Author> {
    let id: Uuid = row.try_get("id").map_err(Error::Database)?;

    Ok(Author {
        id: AuthorId::from(id),
        name: row.try_get("name").map_err(Error::Database)?,
        biography: row.try_get("biography").map_err(Error::Database)?,
        birth_year: row.try_get("birth_year").map_err(Error::Database)?,
        created_at: row.try_get("created_at").map_err(Error::Database)?,
        updated_at: row.try_get("updated_at").map_err(Error::Database)?,
    })
}

/// Insert one author row through any executor (pool or open transaction).
pub(crate) async fn insert_author<'e, E>(executor: E, author: &Author) -> Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO authors (id, name, biography, birth_year, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(author.id.into_uuid())
    .bind(&author.name)
    .bind(&author.biography)
    .bind(author.birth_year)
    .bind(author.created_at)
    .bind(author.updated_at)
    .execute(executor)
    .await
    .map_err(Error::from_sqlx)?;

    Ok(())
}

#[async_trait]
impl AuthorRepositoryPort for PgAuthorRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> ApplicationResult<Vec<Author>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, biography, birth_year, created_at, updated_at
            FROM authors
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(row_to_author)
            .collect::<Result<Vec<_>>>()?)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: AuthorId) -> ApplicationResult<Option<Author>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, biography, birth_year, created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(row_to_author).transpose()?)
    }

    #[instrument(skip(self, author), fields(author_id = %author.id))]
    async fn insert(&self, author: &Author) -> ApplicationResult<()> {
        insert_author(&self.pool, author).await?;
        debug!("Author inserted");
        Ok(())
    }

    #[instrument(skip(self, author), fields(author_id = %author.id))]
    async fn update(&self, author: &Author) -> ApplicationResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET name = $2, biography = $3, birth_year = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(author.id.into_uuid())
        .bind(&author.name)
        .bind(&author.biography)
        .bind(author.birth_year)
        .bind(author.updated_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AuthorId) -> ApplicationResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(Error::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ApplicationResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(count as u64)
    }
}

/// In-memory implementation of AuthorRepositoryPort.
pub struct InMemoryAuthorRepository {
    store: InMemoryStore,
}

impl InMemoryAuthorRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthorRepositoryPort for InMemoryAuthorRepository {
    async fn list(&self) -> ApplicationResult<Vec<Author>> {
        let mut authors: Vec<Author> = self.store.read(|t| t.authors.values().cloned().collect());
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(authors)
    }

    async fn get(&self, id: AuthorId) -> ApplicationResult<Option<Author>> {
        Ok(self.store.read(|t| t.authors.get(&id).cloned()))
    }

    async fn insert(&self, author: &Author) -> ApplicationResult<()> {
        self.store.write(|t| {
            t.authors.insert(author.id, author.clone());
        });
        Ok(())
    }

    async fn update(&self, author: &Author) -> ApplicationResult<bool> {
        Ok(self.store.write(|t| match t.authors.get_mut(&author.id) {
            Some(existing) => {
                *existing = author.clone();
                true
            }
            None => false,
        }))
    }

    async fn delete(&self, id: AuthorId) -> ApplicationResult<bool> {
        let removed = self.store.write(|t| {
            if t.books.values().any(|b| b.author_id == id) {
                return Err(Error::Constraint(format!("author {} still has books", id)));
            }
            Ok(t.authors.remove(&id).is_some())
        })?;
        Ok(removed)
    }

    async fn count(&self) -> ApplicationResult<u64> {
        Ok(self.store.read(|t| t.authors.len() as u64))
    }
}
