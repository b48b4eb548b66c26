//! Sign-up, sign-in and sign-out actions.
//!
//! DESIGN
//! ======
//! These are the credential checks the client-side controller wraps. Each
//! action reports expected rejections (bad input, duplicate email, wrong
//! password) as an [`AuthResult`] with a user-facing message. Infrastructure
//! failures are logged and collapsed into a generic message so nothing about
//! the store leaks to the caller.
//!
//! A successful sign-up or sign-in always issues a brand-new session cookie
//! through [`SessionManager::create_session`](crate::session::SessionManager::create_session).

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::password::{self, HashError};
use crate::model::{AuthResult, Credentials};
use crate::session::{CookieStore, SessionPayload};
use crate::state::AppState;
use crate::store::StoreError;

pub const MIN_PASSWORD_LEN: usize = 8;

pub const MSG_REQUIRED: &str = "Email and password are required";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_EMAIL_TAKEN: &str = "Email already registered";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_SIGN_UP_FAILED: &str = "An error occurred during sign up";
pub const MSG_SIGN_IN_FAILED: &str = "An error occurred during sign in";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Current user as exposed by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Register a new user and start their session.
pub async fn sign_up<S: CookieStore>(state: &AppState, jar: &mut S, credentials: &Credentials) -> AuthResult {
    match try_sign_up(state, jar, credentials).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "sign up failed");
            AuthResult::failure(MSG_SIGN_UP_FAILED)
        }
    }
}

async fn try_sign_up<S: CookieStore>(
    state: &AppState,
    jar: &mut S,
    credentials: &Credentials,
) -> Result<AuthResult, AuthError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Ok(AuthResult::failure(MSG_REQUIRED));
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        return Ok(AuthResult::failure(MSG_PASSWORD_TOO_SHORT));
    }
    let Some(email) = normalize_email(&credentials.email) else {
        return Ok(AuthResult::failure(MSG_INVALID_EMAIL));
    };

    if state.users.find_by_email(&email).await?.is_some() {
        return Ok(AuthResult::failure(MSG_EMAIL_TAKEN));
    }

    let hash = password::hash_password(&credentials.password)?;
    let user = match state.users.create_user(&email, &hash).await {
        Ok(user) => user,
        // Lost a race with a concurrent sign-up for the same address.
        Err(StoreError::DuplicateEmail(_)) => return Ok(AuthResult::failure(MSG_EMAIL_TAKEN)),
        Err(e) => return Err(e.into()),
    };

    state.sessions.create_session(jar, &user.id.to_string(), &user.email);
    tracing::info!(user_id = %user.id, "user signed up");
    Ok(AuthResult::ok())
}

/// Check credentials and start a session.
pub async fn sign_in<S: CookieStore>(state: &AppState, jar: &mut S, credentials: &Credentials) -> AuthResult {
    match try_sign_in(state, jar, credentials).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "sign in failed");
            AuthResult::failure(MSG_SIGN_IN_FAILED)
        }
    }
}

async fn try_sign_in<S: CookieStore>(
    state: &AppState,
    jar: &mut S,
    credentials: &Credentials,
) -> Result<AuthResult, AuthError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Ok(AuthResult::failure(MSG_REQUIRED));
    }
    let Some(email) = normalize_email(&credentials.email) else {
        return Ok(AuthResult::failure(MSG_INVALID_CREDENTIALS));
    };

    let Some(user) = state.users.find_by_email(&email).await? else {
        return Ok(AuthResult::failure(MSG_INVALID_CREDENTIALS));
    };
    if !password::verify_password(&user.password_hash, &credentials.password) {
        return Ok(AuthResult::failure(MSG_INVALID_CREDENTIALS));
    }

    state.sessions.create_session(jar, &user.id.to_string(), &user.email);
    tracing::info!(user_id = %user.id, "user signed in");
    Ok(AuthResult::ok())
}

/// End the current session.
pub fn sign_out<S: CookieStore>(state: &AppState, jar: &mut S) {
    state.sessions.delete_session(jar);
}

/// Look up the user behind `session`. Store failures read as signed out.
pub async fn get_user(state: &AppState, session: &SessionPayload) -> Option<PublicUser> {
    let id = Uuid::parse_str(&session.user_id).ok()?;
    match state.users.find_by_id(id).await {
        Ok(user) => user.map(|u| PublicUser { id: u.id, email: u.email, created_at: u.created_at }),
        Err(e) => {
            tracing::error!(error = %e, user_id = %id, "user lookup failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
