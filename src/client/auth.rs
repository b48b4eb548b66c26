//! Auth controller: loading state around sign-in and sign-up.
//!
//! DESIGN
//! ======
//! `is_loading` is raised when an action starts and lowered by a drop guard,
//! so it falls back to `false` on every exit: success, a rejected result, an
//! error from the action or from resolution, and a dropped future.
//!
//! Overlapping calls share the one flag and are not serialized; whichever
//! call settles last decides the final value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{AnonWorkStore, AuthActions, ClientError, Navigator, ProjectApi, resolve};
use crate::model::AuthResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SignIn,
    SignUp,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Self::SignIn => "sign_in",
            Self::SignUp => "sign_up",
        }
    }
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct AuthController {
    actions: Arc<dyn AuthActions>,
    anon_work: Arc<dyn AnonWorkStore>,
    projects: Arc<dyn ProjectApi>,
    navigator: Arc<dyn Navigator>,
    loading: AtomicBool,
}

impl AuthController {
    #[must_use]
    pub fn new(
        actions: Arc<dyn AuthActions>,
        anon_work: Arc<dyn AnonWorkStore>,
        projects: Arc<dyn ProjectApi>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { actions, anon_work, projects, navigator, loading: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Sign in and, on success, navigate to the resolved project.
    ///
    /// Returns the action's result unchanged.
    ///
    /// # Errors
    ///
    /// The action's own error, or the first failing resolution call.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.run(Action::SignIn, email, password).await
    }

    /// Sign up and, on success, navigate to the resolved project.
    ///
    /// Returns the action's result unchanged.
    ///
    /// # Errors
    ///
    /// The action's own error, or the first failing resolution call.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        self.run(Action::SignUp, email, password).await
    }

    async fn run(&self, action: Action, email: &str, password: &str) -> Result<AuthResult, ClientError> {
        let _loading = LoadingGuard::raise(&self.loading);

        let result = match action {
            Action::SignIn => self.actions.sign_in(email, password).await,
            Action::SignUp => self.actions.sign_up(email, password).await,
        }
        .inspect_err(|e| tracing::warn!(action = action.as_str(), error = %e, "auth action failed"))?;

        if result.success {
            let path = resolve::resolve_destination(&*self.anon_work, &*self.projects, &*self.navigator).await?;
            tracing::info!(action = action.as_str(), %path, "signed in, navigated to project");
        } else {
            tracing::debug!(action = action.as_str(), error = ?result.error, "auth action rejected");
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
