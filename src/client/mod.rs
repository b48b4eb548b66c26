//! Client-side auth flow.
//!
//! ARCHITECTURE
//! ============
//! [`AuthController`] wraps the sign-in/sign-up actions with a loading flag
//! and, on success, runs [`resolve::resolve_destination`] to pick the project
//! the user lands on. Everything it talks to is a narrow capability trait
//! injected at construction:
//!
//! - [`AuthActions`]: the credential checks (`/api/auth/*` via [`http::HttpApi`])
//! - [`ProjectApi`]: project listing and creation (`/api/projects`)
//! - [`AnonWorkStore`]: work captured before signing in ([`anon_work::FileAnonWork`])
//! - [`Navigator`]: where the user is sent afterwards
//!
//! ERROR HANDLING
//! ==============
//! A rejected sign-in is a normal [`AuthResult`]. Transport and server
//! failures are [`ClientError`]s and reach the caller unchanged.

pub mod anon_work;
pub mod auth;
pub mod http;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_helpers;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{AuthResult, ChatMessage, NewProject, ProjectRef};

pub use auth::AuthController;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Work captured before the user authenticated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonWorkSnapshot {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Virtual file system keyed by path.
    #[serde(default)]
    pub file_system_data: Map<String, Value>,
}

// =============================================================================
// CAPABILITIES
// =============================================================================

#[async_trait::async_trait]
pub trait AuthActions: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, ClientError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResult, ClientError>;
}

#[async_trait::async_trait]
pub trait ProjectApi: Send + Sync {
    /// Projects of the signed-in user.
    ///
    /// Implementations must return them most recently relevant first.
    /// Resolution takes the first element as-is and never re-sorts, so a
    /// change in this ordering silently changes where users land.
    async fn list(&self) -> Result<Vec<ProjectRef>, ClientError>;

    async fn create(&self, project: NewProject) -> Result<ProjectRef, ClientError>;
}

pub trait AnonWorkStore: Send + Sync {
    fn get(&self) -> Option<AnonWorkSnapshot>;

    fn clear(&self);
}

pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}
