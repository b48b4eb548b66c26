//! Session store adapter: cookie carriers.
//!
//! DESIGN
//! ======
//! Two carriers, one contract each:
//!
//! - [`CookieStore`] is the mutable carrier. It is implemented for the
//!   axum-extra [`CookieJar`] a handler takes as input and hands back with its
//!   response, so writes become `Set-Cookie` headers.
//! - [`CookieSource`] is the read-only carrier. It is implemented for inbound
//!   request headers and parts, which is all a guard or extractor sees.
//!
//! Only this module turns [`CookieAttributes`] into real cookie attributes.

use axum::http::request::Parts;
use axum::http::{HeaderMap, Request};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

/// Attribute set applied when a cookie is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieAttributes {
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: &'static str,
    pub expires: OffsetDateTime,
    pub secure: bool,
}

/// Read-only cookie access.
pub trait CookieSource {
    /// Value of the cookie called `name`, if present and non-empty.
    fn get_cookie(&self, name: &str) -> Option<String>;
}

/// Read/write cookie access, available where a response can be shaped.
pub trait CookieStore: CookieSource {
    fn set_cookie(&mut self, name: &str, value: String, attributes: &CookieAttributes);

    /// Instruct the client to drop `name`. Safe when the cookie is absent.
    fn delete_cookie(&mut self, name: &str);
}

fn jar_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

impl CookieSource for CookieJar {
    fn get_cookie(&self, name: &str) -> Option<String> {
        jar_value(self, name)
    }
}

impl CookieStore for CookieJar {
    fn set_cookie(&mut self, name: &str, value: String, attributes: &CookieAttributes) {
        let cookie = Cookie::build((name.to_owned(), value))
            .path(attributes.path)
            .http_only(attributes.http_only)
            .same_site(attributes.same_site)
            .secure(attributes.secure)
            .expires(attributes.expires);
        *self = std::mem::take(self).add(cookie);
    }

    fn delete_cookie(&mut self, name: &str) {
        let removal = Cookie::build((name.to_owned(), ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::ZERO);
        *self = std::mem::take(self).add(removal);
    }
}

impl CookieSource for HeaderMap {
    fn get_cookie(&self, name: &str) -> Option<String> {
        jar_value(&CookieJar::from_headers(self), name)
    }
}

impl CookieSource for Parts {
    fn get_cookie(&self, name: &str) -> Option<String> {
        self.headers.get_cookie(name)
    }
}

impl<B> CookieSource for Request<B> {
    fn get_cookie(&self, name: &str) -> Option<String> {
        self.headers().get_cookie(name)
    }
}

#[cfg(test)]
#[path = "cookie_test.rs"]
mod tests;
