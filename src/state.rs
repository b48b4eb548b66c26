//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the user and project stores behind trait objects and the session
//! manager. Clone is required by Axum; every field is cheap to clone.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::session::{SessionManager, TokenCodec};
use crate::store::memory::{MemoryProjectStore, MemoryUserStore};
use crate::store::postgres::{PgProjectStore, PgUserStore};
use crate::store::{ProjectStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub sessions: SessionManager,
}

impl AppState {
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>, projects: Arc<dyn ProjectStore>, sessions: SessionManager) -> Self {
        Self { users, projects, sessions }
    }

    /// State backed by Postgres.
    #[must_use]
    pub fn with_pool(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgProjectStore::new(pool)),
            session_manager(config),
        )
    }

    /// State backed by in-process stores.
    #[must_use]
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(Arc::new(MemoryUserStore::new()), Arc::new(MemoryProjectStore::new()), session_manager(config))
    }
}

fn session_manager(config: &AppConfig) -> SessionManager {
    SessionManager::new(TokenCodec::new(config.jwt_secret.as_bytes()), config.cookie_secure)
}

// =============================================================================
// TEST HELPERS
// =============================================================================
