//! HTTP route handlers.
//!
//! This module organizes all API endpoints by resource.

pub mod authors;
pub mod books;
pub mod health;

use crate::state::AppState;
use axum::Router;

/// Controller routes under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(books::routes())
        .merge(authors::routes())
}
