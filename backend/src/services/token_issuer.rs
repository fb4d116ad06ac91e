//! # Session Tokens
//!
//! Mints and verifies the HS256 session tokens handed out on register and
//! login. The secret and lifetime come from [`AppConfig`]; nothing here
//! reads the environment.
//!
//! ## Payload
//!
//! ```json
//! { "name": "Green Grocer", "userId": "550e8400-...", "iat": 1700000000, "exp": 1702592000 }
//! ```
//!
//! Tokens are stateless: there is no revocation, a token stays valid until
//! `exp`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;

use super::Vendor;

/// Token errors.
#[derive(Debug, Error)]
pub enum TokenError {
    /// No signing secret configured
    #[error("JWT signing secret is not configured")]
    MissingSecret,

    /// Lifetime is zero or negative
    #[error("Invalid token lifetime: {0}ms")]
    InvalidLifetime(i64),

    /// Signing failed
    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    /// Token is past its `exp`
    #[error("Token has expired")]
    Expired,

    /// Bad signature, malformed token or unexpected claims
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Vendor display name at issue time.
    pub name: String,

    /// Vendor id.
    pub user_id: Uuid,

    /// Issued at (unix seconds).
    pub iat: i64,

    /// Expires at (unix seconds).
    pub exp: i64,
}

/// Signs and verifies session tokens with one shared secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer. An empty secret is a configuration error.
    pub fn new(secret: &str, lifetime: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if lifetime.num_milliseconds() <= 0 {
            return Err(TokenError::InvalidLifetime(lifetime.num_milliseconds()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, TokenError> {
        Self::new(&config.jwt_secret, config.jwt_lifetime)
    }

    /// Mint a token for `vendor`, valid from now for the configured lifetime.
    pub fn issue(&self, vendor: &Vendor) -> Result<String, TokenError> {
        self.issue_at(vendor, Utc::now())
    }

    /// Mint a token as if issued at `now`.
    ///
    /// `exp` is `iat` plus the whole seconds of the lifetime.
    pub fn issue_at(&self, vendor: &Vendor, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            name: vendor.name.clone(),
            user_id: vendor.id(),
            iat,
            exp: iat + self.lifetime.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Check signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}
