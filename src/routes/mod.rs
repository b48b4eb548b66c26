//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the auth and project endpoints under one Axum router. The session
//! guard runs in front of every route and rejects unauthenticated calls to
//! protected prefixes before a handler is reached.

pub mod auth;
pub mod guard;
pub mod projects;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/sign-up", post(auth::sign_up))
        .route("/api/auth/sign-in", post(auth::sign_in))
        .route("/api/auth/sign-out", post(auth::sign_out))
        .route("/api/auth/me", get(auth::me))
        .route("/api/projects", get(projects::list_projects).post(projects::create_project))
        .route("/api/projects/{id}", get(projects::get_project))
        .route("/healthz", get(healthz))
        .layer(middleware::from_fn_with_state(state.clone(), guard::require_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
