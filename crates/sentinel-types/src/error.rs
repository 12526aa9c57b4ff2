use thiserror::Error;

/// Errors surfaced by the Sentinel core.
///
/// Configuration errors are fatal at startup: scanning must not proceed.
/// Vector errors are fatal per call and point at an upstream collaborator bug
/// (typically mismatched encoder versions).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentinelError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("embedding dimension mismatch: left has {left} dimensions, right has {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("degenerate embedding vector: {0}")]
    DegenerateVector(String),
}

impl SentinelError {
    /// Build a configuration error from anything displayable.
    pub fn config(message: impl Into<String>) -> Self {
        SentinelError::Configuration(message.into())
    }

    /// True for errors that must stop the process before any scan runs.
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(self, SentinelError::Configuration(_))
    }
}

pub type SentinelResult<T> = Result<T, SentinelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SentinelError::DimensionMismatch {
            left: 512,
            right: 256,
        };
        let msg = err.to_string();
        assert!(msg.contains("512"));
        assert!(msg.contains("256"));

        let err = SentinelError::config("threat dictionary is empty");
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    fn startup_fatality() {
        assert!(SentinelError::config("x").is_fatal_at_startup());
        assert!(!SentinelError::DegenerateVector("zero norm".into()).is_fatal_at_startup());
    }
}
