//! Session credential signing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use charkha_core::{Phone, UserId};

use crate::models::User;

/// Session credential validity window.
const TOKEN_VALIDITY_DAYS: i64 = 30;

/// Errors from token signing/verification.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failed.
    #[error("token signing failed: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    /// Signature or expiry check failed.
    #[error("token verification failed")]
    Invalid,
}

/// Claims carried by a session credential.
///
/// Exactly the identity the access-control layer needs: user id, phone and
/// role flag. Nothing here requires a store round-trip to check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: UserId,
    /// Phone number the identity was verified against.
    pub phone: Phone,
    /// Admin role flag.
    pub is_admin: bool,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens (HS256).
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Issue a session credential for a verified user, valid 30 days.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            phone: user.phone.clone(),
            is_admin: user.is_admin,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_VALIDITY_DAYS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Verify a bearer token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the signature or expiry check
    /// fails; the two cases are not distinguished.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}
