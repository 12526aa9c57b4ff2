//! Sentinel daemon library
//!
//! REST service over the prompt-injection and cross-modal scan engines:
//! - REST API handlers under `/api/v1`
//! - Layered configuration (defaults, file, `SENTINEL__*` environment)
//! - Server lifecycle with graceful shutdown

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
