//! Persistence for users and projects.
//!
//! ARCHITECTURE
//! ============
//! Services talk to [`UserStore`] and [`ProjectStore`] trait objects held in
//! `AppState`. [`postgres`] backs them with SQLx when `DATABASE_URL` is set;
//! [`memory`] keeps everything in process for development and tests.

pub mod memory;
pub mod postgres;

use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::model::{ChatMessage, NewProject};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    DuplicateEmail(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored json is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stored user row.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

/// Stored project row.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub messages: Vec<ChatMessage>,
    pub data: Map<String, Value>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

// =============================================================================
// TRAITS
// =============================================================================

#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::DuplicateEmail`] if taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait::async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, user_id: Uuid, project: NewProject) -> Result<ProjectRecord, StoreError>;

    /// Projects owned by `user_id`, most recently updated first.
    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<ProjectRecord>, StoreError>;

    /// A project owned by `user_id`; other users' projects are `None`.
    async fn get_project(&self, user_id: Uuid, id: Uuid) -> Result<Option<ProjectRecord>, StoreError>;
}
