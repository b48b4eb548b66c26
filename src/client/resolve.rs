//! Post-authentication destination.
//!
//! Fixed precedence, evaluated once per successful sign-in or sign-up:
//!
//! 1. Anonymous work with at least one message becomes a new project.
//! 2. Otherwise the most recent existing project.
//! 3. Otherwise a new, empty project.
//!
//! Exactly one navigation happens per call. Nothing is retried; a failed
//! create or list is returned to the caller before any navigation.

use rand::Rng;
use serde_json::Map;
use time::OffsetDateTime;
use time::macros::format_description;

use super::{AnonWorkStore, ClientError, Navigator, ProjectApi};
use crate::model::NewProject;

/// Display name for a project rescued from anonymous work.
#[must_use]
pub fn anon_project_name(at: OffsetDateTime) -> String {
    let clock = at
        .format(format_description!("[hour repr:12 padding:none]:[minute]:[second] [period]"))
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    format!("Design from {clock}")
}

/// Display name for a fresh, empty project.
#[must_use]
pub fn fresh_project_name(number: u32) -> String {
    format!("New Design #{number}")
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Pick the destination project, navigate to it, and return the path.
///
/// # Errors
///
/// Propagates the first failing project call unchanged.
pub async fn resolve_destination(
    anon_work: &dyn AnonWorkStore,
    projects: &dyn ProjectApi,
    navigator: &dyn Navigator,
) -> Result<String, ClientError> {
    if let Some(snapshot) = anon_work.get().filter(|s| !s.messages.is_empty()) {
        let project = projects
            .create(NewProject {
                name: anon_project_name(local_now()),
                messages: snapshot.messages,
                data: snapshot.file_system_data,
            })
            .await?;
        anon_work.clear();
        return Ok(go(navigator, &project.id));
    }

    let existing = projects.list().await?;
    if let Some(latest) = existing.first() {
        return Ok(go(navigator, &latest.id));
    }

    let number = rand::rng().random_range(0..100_000);
    let project = projects
        .create(NewProject { name: fresh_project_name(number), messages: Vec::new(), data: Map::new() })
        .await?;
    Ok(go(navigator, &project.id))
}

fn go(navigator: &dyn Navigator, project_id: &str) -> String {
    let path = format!("/{project_id}");
    navigator.push(&path);
    path
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
