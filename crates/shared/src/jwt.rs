//! Bearer token utilities (HS256).
//!
//! Tokens carry the username as subject and an expiry timestamp, and are
//! signed with a secret held by the server. Verification is a pure function
//! of the token, the secret and the current time; no session state is kept.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted secret length in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted access token lifetime (30 days).
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Error type for token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid signing secret: {0}")]
    InvalidSecret(String),

    #[error("Token lifetime must be between 1 and {max} seconds, got {0}", max = MAX_TOKEN_TTL_SECS)]
    InvalidLifetime(i64),
}

/// Claims embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Signing material and lifetimes for bearer tokens.
#[derive(Clone)]
pub struct TokenConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Lifetime of tokens issued by `issue_access_token`.
    pub access_token_ttl: Duration,
    /// Accepted clock skew when checking `exp`.
    pub leeway_secs: u64,
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("leeway_secs", &self.leeway_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenConfig {
    /// Creates a config from a shared secret with the default leeway.
    pub fn new(secret: &str, access_token_ttl_secs: i64) -> Result<Self, JwtError> {
        Self::with_leeway(secret, access_token_ttl_secs, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a config from a shared secret with an explicit leeway.
    pub fn with_leeway(
        secret: &str,
        access_token_ttl_secs: i64,
        leeway_secs: u64,
    ) -> Result<Self, JwtError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(JwtError::InvalidSecret(format!(
                "secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        if !(1..=MAX_TOKEN_TTL_SECS).contains(&access_token_ttl_secs) {
            return Err(JwtError::InvalidLifetime(access_token_ttl_secs));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl: Duration::seconds(access_token_ttl_secs),
            leeway_secs,
        })
    }

    /// Issues a token for `subject` valid for the configured access lifetime.
    pub fn issue_access_token(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_token(subject, self.access_token_ttl)
    }

    /// Issues a signed token for `subject` that expires after `ttl`.
    pub fn issue_token(&self, subject: &str, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Verifies signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        if token_data.claims.sub.is_empty() {
            return Err(JwtError::InvalidToken);
        }

        Ok(token_data.claims)
    }

    /// Returns the subject of a valid token, or `None` for any failure.
    pub fn subject(&self, token: &str) -> Option<String> {
        self.verify_token(token).ok().map(|claims| claims.sub)
    }
}
