//! Application state and dependency wiring.
//!
//! This module defines the shared application state that is passed to all
//! route handlers via Axum's state extraction. Services that work on the
//! store are built per request from [`AppState::scope`].

use crate::auth::TokenService;
use crate::policy::{AccessPolicy, AuthorizationMetrics};
use ebookstore_application::{AuthorService, BookCatalogPort, BookService, ExternalBookService};
use ebookstore_common::config::AppConfig;
use ebookstore_infrastructure::{Database, OpenLibraryCatalog};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration
    pub config: Arc<AppConfig>,

    /// Persistence context factory
    pub database: Database,

    /// Bearer token verification
    pub tokens: TokenService,

    /// Route access table
    pub policy: Arc<AccessPolicy>,

    /// Authorization decision counters
    pub metrics: Arc<AuthorizationMetrics>,

    /// Singleton external catalogue lookup
    pub external_books: ExternalBookService,
}

impl AppState {
    /// Wire the production collaborators for `config` and `database`
    pub fn new(config: AppConfig, database: Database) -> anyhow::Result<Self> {
        let catalog = OpenLibraryCatalog::new(&config.external_books)?;
        Ok(Self::with_catalog(config, database, Arc::new(catalog)))
    }

    /// Wire the state around a specific catalogue implementation
    pub fn with_catalog(
        config: AppConfig,
        database: Database,
        catalog: Arc<dyn BookCatalogPort>,
    ) -> Self {
        Self {
            tokens: TokenService::new(&config.jwt_settings),
            config: Arc::new(config),
            database,
            policy: Arc::new(AccessPolicy::default()),
            metrics: AuthorizationMetrics::new(),
            external_books: ExternalBookService::new(catalog),
        }
    }

    /// Replace the access table
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Book service over a fresh persistence scope
    pub fn books(&self) -> BookService {
        BookService::new(self.database.scope())
    }

    /// Author service over a fresh persistence scope
    pub fn authors(&self) -> AuthorService {
        AuthorService::new(self.database.scope())
    }
}
