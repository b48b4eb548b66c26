//! In-process stores used when no database is configured.

use std::collections::HashMap;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProjectRecord, ProjectStore, StoreError, UserRecord, UserStore};
use crate::model::NewProject;

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_owned()));
        }
        let user = UserRecord {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

/// Projects kept in insertion order; listing sorts by `updated_at` and
/// breaks ties with the later insertion first.
#[derive(Default)]
pub struct MemoryProjectStore {
    projects: RwLock<Vec<ProjectRecord>>,
}

impl MemoryProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn create_project(&self, user_id: Uuid, project: NewProject) -> Result<ProjectRecord, StoreError> {
        let now = OffsetDateTime::now_utc();
        let record = ProjectRecord {
            id: Uuid::new_v4(),
            user_id,
            name: project.name,
            messages: project.messages,
            data: project.data,
            created_at: now,
            updated_at: now,
        };
        self.projects.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_projects(&self, user_id: Uuid) -> Result<Vec<ProjectRecord>, StoreError> {
        let projects = self.projects.read().await;
        let mut owned: Vec<(usize, &ProjectRecord)> =
            projects.iter().enumerate().filter(|(_, p)| p.user_id == user_id).collect();
        owned.sort_by(|(ia, a), (ib, b)| b.updated_at.cmp(&a.updated_at).then(ib.cmp(ia)));
        Ok(owned.into_iter().map(|(_, p)| p.clone()).collect())
    }

    async fn get_project(&self, user_id: Uuid, id: Uuid) -> Result<Option<ProjectRecord>, StoreError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == id && p.user_id == user_id).cloned())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
