//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential checks and persistence calls so route
//! handlers stay focused on request decoding, cookies and status codes.

pub mod auth;
pub mod password;
pub mod project;
