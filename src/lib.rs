//! Gatehouse: session credentials and post-authentication routing.
//!
//! ARCHITECTURE
//! ============
//! Two halves share one credential model:
//!
//! - Server side: [`session`] signs and verifies the `auth-token` cookie,
//!   [`services`] implements the sign-in/sign-up/project actions on top of
//!   [`store`], and [`routes`] exposes them over HTTP.
//! - Client side: [`client`] wraps the auth actions in a loading-aware
//!   controller and decides which project the user lands on once signed in.

pub mod client;
pub mod config;
pub mod db;
pub mod model;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
