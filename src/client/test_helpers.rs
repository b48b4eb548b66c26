//! Recording collaborators for controller and resolution tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use super::{AnonWorkSnapshot, AnonWorkStore, AuthActions, ClientError, Navigator, ProjectApi};
use crate::model::{AuthResult, ChatMessage, NewProject, ProjectRef};

pub fn project_ref(id: &str) -> ProjectRef {
    ProjectRef { id: id.into(), name: format!("project {id}") }
}

pub fn hello_snapshot() -> AnonWorkSnapshot {
    let mut fs = serde_json::Map::new();
    fs.insert("/".into(), serde_json::json!({}));
    AnonWorkSnapshot { messages: vec![ChatMessage::new("user", "Hello")], file_system_data: fs }
}

// =============================================================================
// MockProjects
// =============================================================================

pub struct MockProjects {
    listed: Vec<ProjectRef>,
    created_id: String,
    create_error: Option<ClientError>,
    list_gate: Option<Gate>,
    pub created: Mutex<Vec<NewProject>>,
    pub list_calls: AtomicUsize,
}

impl MockProjects {
    pub fn new(listed: Vec<ProjectRef>, created_id: &str) -> Self {
        Self {
            listed,
            created_id: created_id.into(),
            create_error: None,
            list_gate: None,
            created: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_create(error: ClientError) -> Self {
        Self { create_error: Some(error), ..Self::new(Vec::new(), "unused") }
    }

    /// Listing waits on `gate` before answering.
    pub fn gated_list(listed: Vec<ProjectRef>, gate: Gate) -> Self {
        Self { list_gate: Some(gate), ..Self::new(listed, "unused") }
    }

    pub fn created(&self) -> Vec<NewProject> {
        self.created.lock().expect("mock mutex should lock").clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProjectApi for MockProjects {
    async fn list(&self) -> Result<Vec<ProjectRef>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.list_gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        Ok(self.listed.clone())
    }

    async fn create(&self, project: NewProject) -> Result<ProjectRef, ClientError> {
        if let Some(err) = &self.create_error {
            return Err(err.clone());
        }
        let name = project.name.clone();
        self.created.lock().expect("mock mutex should lock").push(project);
        Ok(ProjectRef { id: self.created_id.clone(), name })
    }
}

// =============================================================================
// MockAnonWork
// =============================================================================

#[derive(Default)]
pub struct MockAnonWork {
    snapshot: Mutex<Option<AnonWorkSnapshot>>,
    pub clear_calls: AtomicUsize,
}

impl MockAnonWork {
    pub fn with(snapshot: Option<AnonWorkSnapshot>) -> Self {
        Self { snapshot: Mutex::new(snapshot), clear_calls: AtomicUsize::new(0) }
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls.load(Ordering::SeqCst)
    }
}

impl AnonWorkStore for MockAnonWork {
    fn get(&self) -> Option<AnonWorkSnapshot> {
        self.snapshot.lock().expect("mock mutex should lock").clone()
    }

    fn clear(&self) {
        self.clear_calls.fetch_add(1, Ordering::SeqCst);
        *self.snapshot.lock().expect("mock mutex should lock") = None;
    }
}

// =============================================================================
// RecordingNavigator
// =============================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("mock mutex should lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        self.paths.lock().expect("mock mutex should lock").push(path.to_owned());
    }
}

// =============================================================================
// MockActions
// =============================================================================

/// Pauses an action mid-flight so a test can observe controller state.
pub struct Gate {
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

pub struct MockActions {
    outcome: Result<AuthResult, ClientError>,
    gate: Option<Gate>,
    pub calls: Mutex<Vec<(&'static str, String, String)>>,
}

impl MockActions {
    pub fn returning(outcome: Result<AuthResult, ClientError>) -> Self {
        Self { outcome, gate: None, calls: Mutex::new(Vec::new()) }
    }

    pub fn gated(outcome: Result<AuthResult, ClientError>, gate: Gate) -> Self {
        Self { gate: Some(gate), ..Self::returning(outcome) }
    }

    pub fn calls(&self) -> Vec<(&'static str, String, String)> {
        self.calls.lock().expect("mock mutex should lock").clone()
    }

    async fn respond(&self, action: &'static str, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.calls
            .lock()
            .expect("mock mutex should lock")
            .push((action, email.to_owned(), password.to_owned()));
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.outcome.clone()
    }
}

#[async_trait::async_trait]
impl AuthActions for MockActions {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.respond("sign_in", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.respond("sign_up", email, password).await
    }
}
