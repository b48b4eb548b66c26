//! Auth routes: sign-up, sign-in, sign-out and the current user.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::model::{AuthResult, Credentials};
use crate::services::auth as auth_svc;
use crate::session::SessionPayload;
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Session extracted from the `auth-token` cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub session: SessionPayload,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let session = app_state
            .sessions
            .verify_session(&*parts)
            .ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self { session })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/sign-up`: register and set the session cookie.
pub async fn sign_up(
    State(state): State<AppState>,
    mut jar: CookieJar,
    Json(body): Json<Credentials>,
) -> (CookieJar, Json<AuthResult>) {
    let result = auth_svc::sign_up(&state, &mut jar, &body).await;
    (jar, Json(result))
}

/// `POST /api/auth/sign-in`: check credentials and set the session cookie.
pub async fn sign_in(
    State(state): State<AppState>,
    mut jar: CookieJar,
    Json(body): Json<Credentials>,
) -> (CookieJar, Json<AuthResult>) {
    let result = auth_svc::sign_in(&state, &mut jar, &body).await;
    (jar, Json(result))
}

/// `POST /api/auth/sign-out`: clear the session cookie.
pub async fn sign_out(State(state): State<AppState>, mut jar: CookieJar) -> impl IntoResponse {
    auth_svc::sign_out(&state, &mut jar);
    (jar, StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`: return the current user.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<auth_svc::PublicUser>, StatusCode> {
    auth_svc::get_user(&state, &auth.session)
        .await
        .map(Json)
        .ok_or(StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
