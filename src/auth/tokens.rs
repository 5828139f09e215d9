//! Bearer token issuance and verification.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens.
///
/// Keys are derived once from the configured secret and shared read-only
/// across handlers.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create issuer from a shared secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Issue a token for a user id
    pub fn issue(&self, user_id: u64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<u64> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;

        data.claims
            .sub
            .parse()
            .map_err(|_| StoreError::InvalidToken("non-numeric subject".to_string()))
    }
}
