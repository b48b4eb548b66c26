use super::*;
use axum::body::Body;
use axum::http::header::COOKIE;
use axum_extra::extract::cookie::CookieJar;

use crate::state::test_helpers;

fn request(path: &str, cookie: Option<&str>) -> Request {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

// =============================================================================
// is_protected
// =============================================================================

#[test]
fn project_and_filesystem_paths_are_protected() {
    assert!(is_protected("/api/projects"));
    assert!(is_protected("/api/projects/123"));
    assert!(is_protected("/api/filesystem/read"));
}

#[test]
fn auth_and_health_paths_are_open() {
    assert!(!is_protected("/api/auth/sign-in"));
    assert!(!is_protected("/healthz"));
    assert!(!is_protected("/"));
}

// =============================================================================
// check
// =============================================================================

#[test]
fn open_path_passes_without_session() {
    let state = test_helpers::test_app_state();
    assert!(check(&state, &request("/api/auth/me", None)).is_ok());
}

#[test]
fn protected_path_without_session_is_401() {
    let state = test_helpers::test_app_state();
    let rejection = check(&state, &request("/api/projects", None)).unwrap_err();
    assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn protected_path_with_forged_session_is_401() {
    let state = test_helpers::test_app_state();
    let rejection = check(&state, &request("/api/projects", Some("auth-token=forged.token.value"))).unwrap_err();
    assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn protected_path_with_valid_session_passes() {
    let state = test_helpers::test_app_state();
    let mut jar = CookieJar::new();
    state.sessions.create_session(&mut jar, "user-1", "a@b.co");
    let headers = test_helpers::headers_from_jar(&jar);
    let cookie = headers.get(COOKIE).unwrap().to_str().unwrap().to_owned();

    assert!(check(&state, &request("/api/projects/abc", Some(&cookie))).is_ok());
}
