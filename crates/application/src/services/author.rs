//! Author Service
//!
//! CRUD operations over authors. An author cannot be deleted while books
//! still reference them.

use crate::dto::{AuthorDto, CreateAuthorDto, UpdateAuthorDto};
use crate::mapping::author_to_dto;
use crate::ports::DataContext;
use crate::ApplicationResult;
use ebookstore_domain::{Author, AuthorId, DomainError, NewAuthor};
use tracing::{info, instrument, warn};

/// Author service implementation
pub struct AuthorService {
    ctx: DataContext,
}

impl AuthorService {
    pub fn new(ctx: DataContext) -> Self {
        Self { ctx }
    }

    /// List all authors with their book counts
    #[instrument(skip(self))]
    pub async fn list(&self) -> ApplicationResult<Vec<AuthorDto>> {
        let authors = self.ctx.authors.list().await?;
        let mut dtos = Vec::with_capacity(authors.len());

        for author in &authors {
            let count = self.ctx.books.count_by_author(author.id).await?;
            dtos.push(author_to_dto(author, count));
        }

        Ok(dtos)
    }

    /// Get a single author
    #[instrument(skip(self))]
    pub async fn get(&self, id: AuthorId) -> ApplicationResult<AuthorDto> {
        let author = self.load(id).await?;
        let count = self.ctx.books.count_by_author(id).await?;
        Ok(author_to_dto(&author, count))
    }

    /// Create a new author
    #[instrument(skip(self, request))]
    pub async fn create(&self, request: CreateAuthorDto) -> ApplicationResult<AuthorDto> {
        let author = Author::create(NewAuthor::from(request));
        self.ctx.authors.insert(&author).await?;

        info!(author_id = %author.id, "Author created");

        Ok(author_to_dto(&author, 0))
    }

    /// Replace an existing author
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: AuthorId, request: UpdateAuthorDto) -> ApplicationResult<AuthorDto> {
        let mut author = self.load(id).await?;
        author.apply(NewAuthor::from(request));

        if !self.ctx.authors.update(&author).await? {
            return Err(DomainError::AuthorNotFound(id).into());
        }

        let count = self.ctx.books.count_by_author(id).await?;
        info!(author_id = %id, "Author updated");

        Ok(author_to_dto(&author, count))
    }

    /// Delete an author who has no books
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AuthorId) -> ApplicationResult<()> {
        self.load(id).await?;

        let count = self.ctx.books.count_by_author(id).await?;
        if count > 0 {
            warn!(author_id = %id, books = count, "Refusing to delete author with books");
            return Err(DomainError::AuthorHasBooks(id, count).into());
        }

        if !self.ctx.authors.delete(id).await? {
            return Err(DomainError::AuthorNotFound(id).into());
        }

        info!(author_id = %id, "Author deleted");
        Ok(())
    }

    async fn load(&self, id: AuthorId) -> ApplicationResult<Author> {
        self.ctx
            .authors
            .get(id)
            .await?
            .ok_or_else(|| DomainError::AuthorNotFound(id).into())
    }
}
