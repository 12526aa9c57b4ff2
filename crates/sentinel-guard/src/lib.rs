//! # sentinel-guard
//!
//! Facade that screens media frames end to end.
//!
//! The core engines take OCR tokens and embeddings; this crate connects them
//! to the collaborators that produce those inputs:
//!
//! - [`OcrProvider`] turns a [`Frame`] into text tokens for Engine D
//! - [`ImageEncoder`] and [`TextEncoder`] produce embeddings for Engine E
//!
//! [`SentinelGuard::scan`] runs both engines concurrently and returns a
//! [`ScanReport`]. [`SentinelConfig`] loads thresholds and the threat
//! dictionary from defaults, a config file and `SENTINEL__*` variables.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod guard;
pub mod mocks;

pub use collaborators::{CollaboratorError, Frame, ImageEncoder, OcrProvider, TextEncoder};
pub use config::{DictionaryConfig, ScanEngines, SentinelConfig};
pub use error::{GuardError, GuardResult};
pub use guard::{ScanReport, SentinelGuard};
