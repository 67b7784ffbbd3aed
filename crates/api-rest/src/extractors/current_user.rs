//! Authenticated caller extractor.

use crate::{auth::AuthenticatedUser, error::ApiError};
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// The caller the authentication middleware verified
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Bearer token required".to_string()))
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
