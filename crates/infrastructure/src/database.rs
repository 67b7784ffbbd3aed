//! Database module - persistence context construction
//!
//! The connection string decides the backend:
//! - `postgres://` / `postgresql://` build a lazily connecting PostgreSQL pool
//! - `memory://` builds an in-memory store shared by every scope
//!
//! Each request (and the startup seeder) calls [`Database::scope`] to get its
//! own set of repository handles.

use ebookstore_application::DataContext;
use ebookstore_domain::{Author, Book};
use ebookstore_common::config::AppConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::repositories::{
    insert_author, insert_book, InMemoryAuthorRepository, InMemoryBookRepository, InMemoryStore, PgAuthorRepository,
    PgBookRepository,
};
use crate::{Error, Result};

/// Schema statements, applied in order and safe to re-run.
pub const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS authors (
        id UUID PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        biography TEXT NULL,
        birth_year INTEGER NULL,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS books (
        id UUID PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        isbn VARCHAR(13) NOT NULL UNIQUE,
        published_year INTEGER NOT NULL,
        price_cents BIGINT NOT NULL,
        stock INTEGER NOT NULL,
        author_id UUID NOT NULL REFERENCES authors (id),
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_books_author_id ON books (author_id)",
];

/// Database configuration for PostgreSQL connections.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to keep open
    pub min_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
    /// Maximum time a connection can be idle before being closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl DatabaseConfig {
    /// Pool settings from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.database.max_connections,
            min_connections: config.database.min_connections,
            acquire_timeout: config.database.acquire_timeout(),
            ..Default::default()
        }
    }
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a pool without opening any connection yet.
    #[instrument(skip(url, config), fields(max_connections = config.max_connections))]
    pub fn connect_lazy(url: &str, config: &DatabaseConfig) -> Result<Self> {
        info!("Initializing database connection pool");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(Some(config.max_lifetime))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("SET timezone = 'UTC'")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_lazy(url)
            .map_err(Error::Database)?;

        Ok(Self { pool })
    }

    /// Get reference to the underlying pool.
    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(Error::Database)?;
        }
        debug!("Database schema ensured");
        Ok(())
    }

    /// Insert authors and their books in a single transaction.
    #[instrument(skip_all, fields(authors = authors.len(), books = books.len()))]
    pub async fn insert_catalogue(&self, authors: &[Author], books: &[Book]) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        for author in authors {
            insert_author(&mut *tx, author).await?;
        }
        for book in books {
            insert_book(&mut *tx, book).await?;
        }

        tx.commit().await.map_err(Error::Database)?;
        Ok(())
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}

/// Health status for the persistence backend.
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the backend answered
    pub healthy: bool,
    /// Query latency
    pub latency: Duration,
    /// Backend name ("postgres" or "memory")
    pub backend: &'static str,
    /// Error message if unhealthy
    pub error: Option<String>,
}

/// The persistence context factory
#[derive(Clone, Debug)]
pub enum Database {
    /// PostgreSQL through a shared pool
    Postgres(DatabasePool),
    /// Process-local store for development and tests
    InMemory(InMemoryStore),
}

impl Database {
    /// Build the backend named by `connection_string`.
    ///
    /// Never opens a connection; an unreachable PostgreSQL server surfaces on
    /// first use.
    pub fn connect(connection_string: &str, config: &DatabaseConfig) -> Result<Self> {
        let connection_string = connection_string.trim();

        if connection_string.starts_with("postgres://")
            || connection_string.starts_with("postgresql://")
        {
            return Ok(Self::Postgres(DatabasePool::connect_lazy(
                connection_string,
                config,
            )?));
        }

        if connection_string.starts_with("memory://") {
            warn!("Using the in-memory store; data is lost on shutdown");
            return Ok(Self::in_memory());
        }

        Err(Error::Configuration(
            "Unsupported connection string scheme".to_string(),
        ))
    }

    /// Fresh, empty in-memory database
    pub fn in_memory() -> Self {
        Self::InMemory(InMemoryStore::new())
    }

    /// Repository handles for one unit of work
    pub fn scope(&self) -> DataContext {
        match self {
            Self::Postgres(pool) => DataContext::new(
                Arc::new(PgBookRepository::new(pool.pool().clone())),
                Arc::new(PgAuthorRepository::new(pool.pool().clone())),
            ),
            Self::InMemory(store) => DataContext::new(
                Arc::new(InMemoryBookRepository::new(store.clone())),
                Arc::new(InMemoryAuthorRepository::new(store.clone())),
            ),
        }
    }

    /// Create the schema where the backend needs one
    pub async fn ensure_schema(&self) -> Result<()> {
        match self {
            Self::Postgres(pool) => pool.ensure_schema().await,
            Self::InMemory(_) => Ok(()),
        }
    }

    /// Store a batch of authors and books all-or-nothing
    pub async fn insert_catalogue(&self, authors: &[Author], books: &[Book]) -> Result<()> {
        match self {
            Self::Postgres(pool) => pool.insert_catalogue(authors, books).await,
            Self::InMemory(store) => store.insert_all(authors, books),
        }
    }

    /// Backend name for logs and health output
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    /// Check the backend by reading the author count through a fresh scope.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthStatus {
        let start = std::time::Instant::now();

        match self.scope().authors.count().await {
            Ok(_) => HealthStatus {
                healthy: true,
                latency: start.elapsed(),
                backend: self.backend(),
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Health check failed");
                HealthStatus {
                    healthy: false,
                    latency: start.elapsed(),
                    backend: self.backend(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
