//! Postgres-backed stores.
//!
//! Queries are plain `sqlx::query` strings; the schema lives in
//! `src/db/migrations` and is applied by [`crate::db::init_pool`].

use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{ProjectRecord, ProjectStore, StoreError, UserRecord, UserStore};
use crate::model::{ChatMessage, NewProject};

fn user_from_row(row: &PgRow) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

fn project_from_row(row: &PgRow) -> Result<ProjectRecord, StoreError> {
    let Json(messages): Json<Vec<ChatMessage>> = row.try_get("messages")?;
    let Json(data): Json<serde_json::Map<String, serde_json::Value>> = row.try_get("data")?;
    Ok(ProjectRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        messages,
        data,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let result = sqlx::query(
            r"INSERT INTO users (id, email, password_hash)
              VALUES ($1, $2, $3)
              RETURNING id, email, password_hash, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => user_from_row(&row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(email.to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query("SELECT id, email, password_hash, created_at FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query("SELECT id, email, password_hash, created_at FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }
}

// =============================================================================
// PROJECTS
// =============================================================================

#[derive(Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProjectStore for PgProjectStore {
    async fn create_project(&self, user_id: Uuid, project: NewProject) -> Result<ProjectRecord, StoreError> {
        let row = sqlx::query(
            r"INSERT INTO projects (id, user_id, name, messages, data)
              VALUES ($1, $2, $3, $4, $5)
              RETURNING id, user_id, name, messages, data, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&project.name)
        .bind(Json(&project.messages))
        .bind(Json(&project.data))
        .fetch_one(&self.pool)
        .await?;
        project_from_row(&row)
    }

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<ProjectRecord>, StoreError> {
        let rows = sqlx::query(
            r"SELECT id, user_id, name, messages, data, created_at, updated_at
              FROM projects
              WHERE user_id = $1
              ORDER BY updated_at DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(project_from_row).collect()
    }

    async fn get_project(&self, user_id: Uuid, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        let row = sqlx::query(
            r"SELECT id, user_id, name, messages, data, created_at, updated_at
              FROM projects
              WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(project_from_row).transpose()
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
