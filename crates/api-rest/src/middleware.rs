//! HTTP middleware components.
//!
//! The request pipeline runs, outermost first:
//! - tracing, request id, request logging and the request timeout
//! - HTTPS redirection
//! - bearer authentication
//! - authorization against the access table

pub mod authentication;
pub mod authorization;
pub mod https_redirect;
pub mod logging;
pub mod request_id;

pub use authentication::authenticate;
pub use authorization::authorize;
pub use https_redirect::https_redirect;
pub use logging::logging_middleware;
pub use request_id::{request_id_middleware, RequestId};
