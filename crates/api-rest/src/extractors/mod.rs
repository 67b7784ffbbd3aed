//! Custom Axum extractors.
//!
//! This module provides reusable extractors for the authenticated caller,
//! validated JSON payloads, and path/query parameters.

pub mod current_user;
pub mod params;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use params::{ApiPath, ApiQuery};
pub use validated_json::ValidatedJson;
