//! Token codec: HS256 session credentials.
//!
//! DESIGN
//! ======
//! The credential is a standard three-segment JWT whose claims carry the
//! session payload (`userId`, `email`, `expiresAt`) next to `iat`/`exp`.
//! `exp` is always `iat + 7 days`, stamped here regardless of the payload's
//! own `expiresAt`.
//!
//! Expiry is checked by this module rather than by `jsonwebtoken` so that a
//! single `now` sample decides the outcome and no leeway is granted: a
//! credential whose `exp` is at or before `now` is rejected.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use super::SessionPayload;

/// Lifetime of a session credential and of the cookie that carries it.
pub const SESSION_TTL: Duration = Duration::days(7);

// =============================================================================
// ERRORS
// =============================================================================

/// Why a credential was not accepted (or could not be produced).
///
/// Never surfaced past the session manager; it exists so rejections can be
/// logged with a reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("credential is empty")]
    Empty,
    #[error("credential is malformed: {0}")]
    Malformed(String),
    #[error("credential signature does not match")]
    BadSignature,
    #[error("credential has expired")]
    Expired,
    #[error("credential signing failed: {0}")]
    Signing(String),
}

// =============================================================================
// CLAIMS
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: String,
    email: String,
    #[serde(with = "time::serde::rfc3339")]
    expires_at: OffsetDateTime,
    iat: i64,
    exp: i64,
}

// =============================================================================
// CODEC
// =============================================================================

/// Signs and verifies session credentials with a symmetric secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign `payload`, issued now.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the claims cannot be encoded.
    pub fn sign(&self, payload: &SessionPayload) -> Result<String, TokenError> {
        self.sign_at(payload, OffsetDateTime::now_utc())
    }

    /// Sign `payload` as if issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the claims cannot be encoded.
    pub fn sign_at(&self, payload: &SessionPayload, issued_at: OffsetDateTime) -> Result<String, TokenError> {
        let iat = issued_at.unix_timestamp();
        let claims = Claims {
            user_id: payload.user_id.clone(),
            email: payload.email.clone(),
            expires_at: payload.expires_at,
            iat,
            exp: iat + SESSION_TTL.whole_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify `token` against the current time.
    ///
    /// # Errors
    ///
    /// Returns the reason the credential was rejected.
    pub fn verify(&self, token: &str) -> Result<SessionPayload, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    /// Verify `token` as of `now`.
    ///
    /// # Errors
    ///
    /// Returns the reason the credential was rejected.
    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<SessionPayload, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed(e.to_string()),
        })?;

        let claims = data.claims;
        if claims.exp <= now.unix_timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(SessionPayload { user_id: claims.user_id, email: claims.email, expires_at: claims.expires_at })
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
