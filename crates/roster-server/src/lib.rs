// ABOUTME: HTTP server for roster, providing the student REST API over a RecordStore.
// ABOUTME: Uses Axum with shared store state, YAML configuration, and bounded graceful shutdown.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routes;
pub mod serve;

pub use app_state::{AppState, SharedState};
pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use routes::create_router;
pub use serve::{ServeError, ShutdownOutcome, release, serve, shutdown_signal};
