//! Authorization against the access table.

use crate::{
    auth::AuthenticatedUser,
    error::ApiError,
    policy::Decision,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

/// Runs after authentication; every decision is counted
pub async fn authorize(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let user = req.extensions().get::<AuthenticatedUser>();
    let decision = state.policy.authorize(req.method(), req.uri().path(), user);
    state.metrics.record(&decision);

    match decision {
        Decision::Granted => next.run(req).await,
        Decision::Denied(reason) => {
            debug!(path = %req.uri().path(), reason = %reason, "Access denied");
            if user.is_some() {
                ApiError::Forbidden(reason).into_response()
            } else {
                ApiError::Unauthorized(reason).into_response()
            }
        }
    }
}
