//! HTTPS redirection.
//!
//! Active only when `server.https_port` is configured. Requests that did not
//! arrive over TLS, directly or behind a proxy setting
//! `X-Forwarded-Proto: https`, are answered with a 307 to the HTTPS URL.

use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Request, State},
    http::{header, uri::Authority, HeaderMap, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub async fn https_redirect(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(https_port) = state.config.server.https_port else {
        return next.run(req).await;
    };

    if is_secure(req.uri(), req.headers()) {
        return next.run(req).await;
    }

    match redirect_target(req.uri(), req.headers(), https_port) {
        Some(location) => {
            debug!(location = %location, "Redirecting to HTTPS");
            Redirect::temporary(&location).into_response()
        }
        None => ApiError::BadRequest("Missing Host header".to_string()).into_response(),
    }
}

fn is_secure(uri: &Uri, headers: &HeaderMap) -> bool {
    if uri.scheme_str() == Some("https") {
        return true;
    }

    headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
        .unwrap_or(false)
}

/// `https://{host}[:{port}]{path_and_query}`; the port is omitted when it is 443
fn redirect_target(uri: &Uri, headers: &HeaderMap, https_port: u16) -> Option<String> {
    let authority = match uri.authority() {
        Some(authority) => authority.clone(),
        None => headers
            .get(header::HOST)?
            .to_str()
            .ok()?
            .parse::<Authority>()
            .ok()?,
    };

    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Some(if https_port == 443 {
        format!("https://{}{}", authority.host(), path)
    } else {
        format!("https://{}:{}{}", authority.host(), https_port, path)
    })
}
