//! Route access rules.
//!
//! An ordered table of `(method?, path prefix, requirement)` entries. The
//! first entry whose method and prefix match decides; paths nothing matches
//! require an authenticated caller.

use crate::auth::AuthenticatedUser;
use axum::http::Method;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Role allowed to modify the catalogue
pub const ADMIN_ROLE: &str = "Admin";

/// What a caller needs to reach a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// No credentials needed
    Anonymous,
    /// Any valid bearer token
    Authenticated,
    /// A valid bearer token carrying this role
    Role(String),
}

/// One row of the access table
#[derive(Debug, Clone)]
pub struct AccessRule {
    method: Option<Method>,
    prefix: String,
    requirement: Requirement,
}

impl AccessRule {
    pub fn new(method: Option<Method>, prefix: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            method,
            prefix: prefix.into(),
            requirement,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        if let Some(expected) = &self.method {
            if expected != method {
                return false;
            }
        }
        // Segment-aware: "/api" matches "/api" and "/api/books" but not "/apix"
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || self.prefix.ends_with('/'),
            None => false,
        }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied(String),
}

/// Ordered access table consulted by authentication and authorization
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    fallback: Requirement,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self {
            rules,
            fallback: Requirement::Authenticated,
        }
    }

    /// Requirement for a request; the first matching rule wins
    pub fn requirement_for(&self, method: &Method, path: &str) -> &Requirement {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| &rule.requirement)
            .unwrap_or(&self.fallback)
    }

    /// Decide whether `user` may reach the route. Only called for callers
    /// that passed authentication.
    pub fn authorize(&self, method: &Method, path: &str, user: Option<&AuthenticatedUser>) -> Decision {
        match (self.requirement_for(method, path), user) {
            (Requirement::Anonymous, _) => Decision::Granted,
            (_, None) => Decision::Denied("authentication required".to_string()),
            (Requirement::Authenticated, Some(_)) => Decision::Granted,
            (Requirement::Role(role), Some(user)) if user.has_role(role) => Decision::Granted,
            (Requirement::Role(role), Some(_)) => Decision::Denied(format!("role '{}' required", role)),
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        let admin = || Requirement::Role(ADMIN_ROLE.to_string());

        Self::new(vec![
            AccessRule::new(None, "/health", Requirement::Anonymous),
            AccessRule::new(None, "/ready", Requirement::Anonymous),
            AccessRule::new(None, "/swagger", Requirement::Anonymous),
            AccessRule::new(None, "/swagger-ui", Requirement::Anonymous),
            AccessRule::new(Some(Method::GET), "/api", Requirement::Authenticated),
            AccessRule::new(Some(Method::POST), "/api", admin()),
            AccessRule::new(Some(Method::PUT), "/api", admin()),
            AccessRule::new(Some(Method::DELETE), "/api", admin()),
        ])
    }
}

/// Counters for authorization decisions
#[derive(Debug, Default)]
pub struct AuthorizationMetrics {
    granted: AtomicU64,
    denied: AtomicU64,
}

impl AuthorizationMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record(&self, decision: &Decision) {
        let counter = match decision {
            Decision::Granted => &self.granted,
            Decision::Denied(_) => &self.denied,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn granted(&self) -> u64 {
        self.granted.load(Ordering::Relaxed)
    }

    pub fn denied(&self) -> u64 {
        self.denied.load(Ordering::Relaxed)
    }

    /// Total decisions made
    pub fn decisions(&self) -> u64 {
        self.granted() + self.denied()
    }
}
