//! Bearer token minting for tests.
//!
//! Tokens are signed with `jsonwebtoken` directly so tests can produce
//! credentials the service must reject (wrong key, issuer, audience, or an
//! expiry in the past).

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

use crate::fixtures::{TEST_AUDIENCE, TEST_ISSUER, TEST_JWT_KEY};

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    iss: String,
    aud: Vec<String>,
    exp: i64,
    iat: i64,
    roles: Vec<String>,
}

/// Builder for signed HS256 test tokens
#[derive(Debug, Clone)]
pub struct TestTokenBuilder {
    key: String,
    subject: String,
    issuer: String,
    audiences: Vec<String>,
    expires_in: Duration,
    roles: Vec<String>,
}

impl TestTokenBuilder {
    /// A token the test configuration accepts, valid for one hour
    pub fn new() -> Self {
        Self {
            key: TEST_JWT_KEY.to_string(),
            subject: "test-user".to_string(),
            issuer: TEST_ISSUER.to_string(),
            audiences: vec![TEST_AUDIENCE.to_string()],
            expires_in: Duration::hours(1),
            roles: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audiences = vec![audience.into()];
        self
    }

    /// Multi-valued `aud` claim
    pub fn with_audiences(mut self, audiences: &[&str]) -> Self {
        self.audiences = audiences.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Expiry relative to now; negative values produce expired tokens
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.expires_in = duration;
        self
    }

    /// Shortcut for a token that expired well outside any clock skew
    pub fn expired(self) -> Self {
        self.expires_in(Duration::hours(-2))
    }

    pub fn build(self) -> String {
        let now = Utc::now();
        let claims = TestClaims {
            sub: self.subject,
            iss: self.issuer,
            aud: self.audiences,
            exp: (now + self.expires_in).timestamp(),
            iat: now.timestamp(),
            roles: self.roles,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.key.as_bytes()),
        )
        .expect("HS256 encoding with a secret key cannot fail")
    }

    /// `Authorization` header value
    pub fn bearer(self) -> String {
        format!("Bearer {}", self.build())
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
