//! Project service: create, list and fetch projects for the session user.

use uuid::Uuid;

use crate::model::NewProject;
use crate::session::SessionPayload;
use crate::state::AppState;
use crate::store::{ProjectRecord, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("session does not identify a user")]
    Unauthorized,
    #[error("project not found: {0}")]
    NotFound(Uuid),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Sessions whose user id is not a UUID cannot own projects.
fn owner_id(session: &SessionPayload) -> Result<Uuid, ProjectError> {
    Uuid::parse_str(&session.user_id).map_err(|_| ProjectError::Unauthorized)
}

/// Create a project owned by the session user.
///
/// # Errors
///
/// `Unauthorized` if the session user id is not a UUID; `Store` if persistence fails.
pub async fn create_project(
    state: &AppState,
    session: &SessionPayload,
    project: NewProject,
) -> Result<ProjectRecord, ProjectError> {
    let owner = owner_id(session)?;
    let record = state.projects.create_project(owner, project).await?;
    tracing::info!(project_id = %record.id, user_id = %owner, "project created");
    Ok(record)
}

/// Projects of the session user, most recently updated first.
///
/// # Errors
///
/// `Unauthorized` if the session user id is not a UUID; `Store` if the query fails.
pub async fn list_projects(state: &AppState, session: &SessionPayload) -> Result<Vec<ProjectRecord>, ProjectError> {
    let owner = owner_id(session)?;
    Ok(state.projects.list_projects(owner).await?)
}

/// One project of the session user.
///
/// # Errors
///
/// `Unauthorized` if the session user id is not a UUID; `NotFound` if the project does not
/// exist or belongs to someone else.
pub async fn get_project(
    state: &AppState,
    session: &SessionPayload,
    id: Uuid,
) -> Result<ProjectRecord, ProjectError> {
    let owner = owner_id(session)?;
    state
        .projects
        .get_project(owner, id)
        .await?
        .ok_or(ProjectError::NotFound(id))
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
