use sentinel_types::SentinelError;
use thiserror::Error;

use crate::collaborators::CollaboratorError;

/// Errors from the guard facade.
///
/// Core errors pass through unchanged; collaborator failures (OCR or encoder
/// outages, undecodable frames) are kept apart from them.
#[derive(Error, Debug)]
pub enum GuardError {
    #[error(transparent)]
    Core(#[from] SentinelError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl GuardError {
    /// True when the failure came from an external collaborator and a retry
    /// at the caller may help.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, GuardError::Collaborator(_))
    }
}

pub type GuardResult<T> = Result<T, GuardError>;
