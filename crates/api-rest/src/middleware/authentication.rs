//! Bearer authentication.
//!
//! Verifies the `Authorization: Bearer` token of every request and stores
//! the resulting [`AuthenticatedUser`] in the request extensions. Routes the
//! access table marks anonymous pass without credentials; everything else is
//! answered with 401 before authorization runs.

use crate::{
    auth::{AuthenticatedUser, TokenError},
    error::ApiError,
    policy::Requirement,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

/// What the `Authorization` header held
enum Credentials {
    Missing,
    Unsupported,
    Verified(AuthenticatedUser),
    Rejected(TokenError),
}

pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let anonymous = matches!(
        state.policy.requirement_for(req.method(), req.uri().path()),
        Requirement::Anonymous
    );

    let credentials = match bearer_token(req.headers()) {
        None => Credentials::Missing,
        Some(None) => Credentials::Unsupported,
        Some(Some(token)) => match state.tokens.validate(token) {
            Ok(claims) => Credentials::Verified(AuthenticatedUser::from(claims)),
            Err(err) => Credentials::Rejected(err),
        },
    };

    match credentials {
        Credentials::Verified(user) => {
            debug!(subject = %user.subject, "Bearer token accepted");
            req.extensions_mut().insert(user);
        }
        _ if anonymous => {}
        Credentials::Missing => {
            debug!(path = %req.uri().path(), "Request without credentials");
            return ApiError::Unauthorized("Bearer token required".to_string()).into_response();
        }
        Credentials::Unsupported => {
            debug!(path = %req.uri().path(), "Unsupported authorization scheme");
            return ApiError::Unauthorized("Bearer token required".to_string()).into_response();
        }
        Credentials::Rejected(err) => {
            warn!(path = %req.uri().path(), reason = %err, "Bearer token rejected");
            return ApiError::Unauthorized(err.to_string()).into_response();
        }
    }

    next.run(req).await
}

/// `None` without an `Authorization` header, `Some(None)` for a scheme other
/// than Bearer
fn bearer_token(headers: &HeaderMap) -> Option<Option<&str>> {
    let value = headers.get(header::AUTHORIZATION)?;
    let value = match value.to_str() {
        Ok(v) => v.trim(),
        Err(_) => return Some(None),
    };

    Some(match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Some(token.trim())
        }
        _ => None,
    })
}
