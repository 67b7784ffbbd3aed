//! EBookStore REST API
//!
//! Axum application for the bookstore: bearer authentication, role-based
//! authorization, book and author controllers, and Swagger documentation in
//! development.
//!
//! ## Architecture
//!
//! - **app**: Router assembly, database seeding, and the server lifecycle
//! - **auth**: Bearer token issuing and verification
//! - **policy**: Route access table and authorization metrics
//! - **middleware**: HTTPS redirection, authentication, authorization, logging
//! - **extractors**: Validated JSON payloads and the authenticated caller
//! - **routes**: HTTP handlers
//! - **docs**: OpenAPI document and Swagger UI
//! - **error**: HTTP error handling and conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ebookstore_api_rest::Application;
//! use ebookstore_common::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     Application::build(config).await?.run().await
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod auth;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod policy;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{build_router, seed_database, Application};
pub use auth::{AuthenticatedUser, Claims, TokenError, TokenService};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use policy::{AccessPolicy, AccessRule, AuthorizationMetrics, Requirement};
pub use state::AppState;
