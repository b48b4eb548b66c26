//! Route guard: rejects unauthenticated requests to protected paths.
//!
//! Runs ahead of every handler and only has the inbound request, so it
//! checks the session through the read-only carrier.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};

use crate::state::AppState;

/// Path prefixes that require a verified session.
pub const PROTECTED_PREFIXES: &[&str] = &["/api/projects", "/api/filesystem"];

#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(serde_json::json!({ "error": "Authentication required" }))).into_response()
}

pub(crate) fn check(state: &AppState, request: &Request) -> Result<(), Response> {
    if !is_protected(request.uri().path()) {
        return Ok(());
    }
    match state.sessions.verify_session(request) {
        Some(_) => Ok(()),
        None => {
            tracing::debug!(path = %request.uri().path(), "unauthenticated request to protected path");
            Err(unauthorized())
        }
    }
}

/// Middleware entry point for [`axum::middleware::from_fn_with_state`].
pub async fn require_session(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Err(rejection) = check(&state, &request) {
        return rejection;
    }
    next.run(request).await
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
