//! reqwest-backed [`AuthActions`] and [`ProjectApi`].
//!
//! One cookie-carrying client per `HttpApi`: the session cookie set by a
//! successful sign-in is sent on every later project call.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{AuthActions, ClientError, ProjectApi};
use crate::model::{AuthResult, Credentials, NewProject, ProjectRef};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Self { base_url: base_url.trim_end_matches('/').to_owned(), client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.request(method, self.url(path));
        let request = if let Some(json) = body { request.json(json) } else { request };

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::Status { status: status.as_u16(), message: error_message(&bytes) });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn credentials(&self, path: &str, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        let body = Credentials { email: email.to_owned(), password: password.to_owned() };
        self.request(Method::POST, path, Some(&body)).await
    }
}

/// `{"error": "..."}` bodies yield their message; anything else is passed through as text.
fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_owned())
}

#[async_trait::async_trait]
impl AuthActions for HttpApi {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.credentials("/api/auth/sign-in", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.credentials("/api/auth/sign-up", email, password).await
    }
}

#[async_trait::async_trait]
impl ProjectApi for HttpApi {
    async fn list(&self) -> Result<Vec<ProjectRef>, ClientError> {
        self.request::<(), _>(Method::GET, "/api/projects", None).await
    }

    async fn create(&self, project: NewProject) -> Result<ProjectRef, ClientError> {
        self.request(Method::POST, "/api/projects", Some(&project)).await
    }
}
