//! Session manager: signed `auth-token` cookie lifecycle.
//!
//! ARCHITECTURE
//! ============
//! Sessions are stateless: the cookie carries a signed credential
//! ([`token`]) and nothing is kept server side. Expiry is enforced by the
//! signed `exp` claim alone.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is reduced at this boundary. Reads return `None` for a
//! missing, malformed, forged or expired credential; writes log and move on.
//! The reason only shows up in logs.

pub mod cookie;
pub mod token;

use axum_extra::extract::cookie::SameSite;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub use cookie::{CookieAttributes, CookieSource, CookieStore};
pub use token::{SESSION_TTL, TokenCodec, TokenError};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "auth-token";

/// Claims carried inside a session credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user_id: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

/// Creates, reads, deletes and verifies sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    codec: TokenCodec,
    cookie_secure: bool,
}

impl SessionManager {
    #[must_use]
    pub fn new(codec: TokenCodec, cookie_secure: bool) -> Self {
        Self { codec, cookie_secure }
    }

    #[must_use]
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issue a fresh session for `user_id` and write it to `jar`.
    pub fn create_session<S: CookieStore>(&self, jar: &mut S, user_id: &str, email: &str) {
        let now = OffsetDateTime::now_utc();
        let expires_at = now + SESSION_TTL;
        let payload = SessionPayload { user_id: user_id.to_owned(), email: email.to_owned(), expires_at };

        let token = match self.codec.sign_at(&payload, now) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, %user_id, "session credential signing failed");
                return;
            }
        };

        let attributes = CookieAttributes {
            http_only: true,
            same_site: SameSite::Lax,
            path: "/",
            expires: expires_at,
            secure: self.cookie_secure,
        };
        jar.set_cookie(SESSION_COOKIE_NAME, token, &attributes);
    }

    /// Session carried by the mutable carrier, if it verifies.
    #[must_use]
    pub fn get_session<S: CookieStore>(&self, jar: &S) -> Option<SessionPayload> {
        self.read(jar)
    }

    /// Drop the session cookie.
    pub fn delete_session<S: CookieStore>(&self, jar: &mut S) {
        jar.delete_cookie(SESSION_COOKIE_NAME);
    }

    /// Session carried by an inbound request, if it verifies.
    ///
    /// Works from the read-only carrier only.
    #[must_use]
    pub fn verify_session<R: CookieSource + ?Sized>(&self, request: &R) -> Option<SessionPayload> {
        self.read(request)
    }

    fn read<R: CookieSource + ?Sized>(&self, source: &R) -> Option<SessionPayload> {
        let token = source.get_cookie(SESSION_COOKIE_NAME)?;
        match self.codec.verify(&token) {
            Ok(payload) => Some(payload),
            Err(reason) => {
                tracing::debug!(%reason, "rejected session credential");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
