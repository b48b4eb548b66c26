//! Project routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use uuid::Uuid;

use super::auth::AuthUser;
use crate::model::{ChatMessage, NewProject};
use crate::services::project::{self, ProjectError};
use crate::state::AppState;
use crate::store::ProjectRecord;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub messages: Vec<ChatMessage>,
    pub data: Map<String, Value>,
}

fn summary(record: &ProjectRecord) -> ProjectSummary {
    ProjectSummary {
        id: record.id,
        name: record.name.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

pub(crate) fn project_error_to_status(err: ProjectError) -> StatusCode {
    match err {
        ProjectError::Unauthorized => StatusCode::UNAUTHORIZED,
        ProjectError::NotFound(_) => StatusCode::NOT_FOUND,
        ProjectError::Store(e) => {
            tracing::error!(error = %e, "project store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// `GET /api/projects`: the caller's projects, most recently updated first.
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ProjectSummary>>, StatusCode> {
    let records = project::list_projects(&state, &auth.session)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(records.iter().map(summary).collect()))
}

/// `POST /api/projects`: create a project.
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewProject>,
) -> Result<(StatusCode, Json<ProjectSummary>), StatusCode> {
    let record = project::create_project(&state, &auth.session, body)
        .await
        .map_err(project_error_to_status)?;
    Ok((StatusCode::CREATED, Json(summary(&record))))
}

/// `GET /api/projects/:id`: one project with its messages and files.
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectDetail>, StatusCode> {
    let record = project::get_project(&state, &auth.session, id)
        .await
        .map_err(project_error_to_status)?;
    Ok(Json(ProjectDetail { summary: summary(&record), messages: record.messages, data: record.data }))
}

#[cfg(test)]
#[path = "projects_test.rs"]
mod tests;
