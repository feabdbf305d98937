//! userform-server: HTTP API for registration submissions
//!
//! Exposes the record service from `userform-core` over axum, with
//! sqlx-backed stores for PostgreSQL and MySQL. The datastore is
//! injected as `Arc<dyn UserStore>`; handlers never know which
//! backend they are talking to.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{build_router, run_server, AppState};
