//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs. Verification checks the signature, issuer,
//! audience and expiry with the configured clock skew as leeway.

use chrono::Utc;
use ebookstore_common::config::JwtSettings;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Claims carried in a bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audiences; a single string is accepted too
    #[serde(deserialize_with = "one_or_many")]
    pub aud: Vec<String>,

    /// Expiration time (UTC timestamp)
    pub exp: i64,

    /// Issued at (UTC timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Role names; a single `role` claim is accepted too
    #[serde(default, alias = "role", deserialize_with = "one_or_many")]
    pub roles: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(role) => vec![role],
        OneOrMany::Many(roles) => roles,
    })
}

/// Why a token was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token issuer is not accepted")]
    InvalidIssuer,

    #[error("token audience is not accepted")]
    InvalidAudience,

    #[error("token is malformed: {0}")]
    Malformed(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::InvalidIssuer => Self::InvalidIssuer,
            ErrorKind::InvalidAudience => Self::InvalidAudience,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// The caller behind a verified token, stored in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Token subject
    pub subject: String,

    /// Granted roles
    pub roles: Vec<String>,

    /// Original claims
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Check if the user holds `role` (case-sensitive)
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            roles: claims.roles.clone(),
            claims,
        }
    }
}

/// Upper bound on issued token lifetimes (one year)
const MAX_TOKEN_LIFETIME_MINUTES: u64 = 60 * 24 * 365;

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: chrono::Duration,
}

/// Issues and verifies bearer tokens; cheap to clone
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
}

impl TokenService {
    pub fn new(settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = settings.clock_skew_seconds;

        let lifetime = chrono::Duration::minutes(
            settings.token_lifetime_minutes.min(MAX_TOKEN_LIFETIME_MINUTES) as i64,
        );

        Self {
            keys: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(settings.key.as_bytes()),
                decoding: DecodingKey::from_secret(settings.key.as_bytes()),
                validation,
                issuer: settings.issuer.clone(),
                audience: settings.audience.clone(),
                lifetime,
            }),
        }
    }

    /// Mint a token for `subject` with the configured issuer, audience and lifetime
    pub fn issue(&self, subject: &str, roles: &[&str]) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.keys.issuer.clone(),
            aud: vec![self.keys.audience.clone()],
            exp: (now + self.keys.lifetime).timestamp(),
            iat: now.timestamp(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(TokenError::from)
    }

    /// Verify a raw token and return its claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &self.keys.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.keys.issuer)
            .field("audience", &self.keys.audience)
            .field("leeway", &self.keys.validation.leeway)
            .finish()
    }
}
