//! Seams for the external collaborators the engines consume.
//!
//! Sentinel never runs OCR or an encoder itself. Deployments plug their
//! models in behind these traits; tests use [`crate::mocks`].

use async_trait::async_trait;
use sentinel_types::{EmbeddingVector, TextToken};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single still image: encoded bytes as extracted from the media stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Caller-chosen label used in logs and reports
    pub label: Option<String>,
    /// Encoded image (PNG, JPEG, ...)
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            label: None,
            data: data.into(),
        }
    }

    pub fn labelled(label: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            label: Some(label.into()),
            data: data.into(),
        }
    }
}

/// Failures raised by collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("image encoder failed: {0}")]
    ImageEncoder(String),

    #[error("text encoder failed: {0}")]
    TextEncoder(String),
}

/// Recognizes text in a frame.
///
/// Returns tokens in the engine's reading order or with positions; "no text"
/// is an empty vector, never an error.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    async fn recognize(&self, frame: &Frame) -> Result<Vec<TextToken>, CollaboratorError>;
}

/// Embeds a frame into the shared image/text space.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode_image(&self, frame: &Frame) -> Result<EmbeddingVector, CollaboratorError>;
}

/// Embeds a transcript into the shared image/text space.
#[async_trait]
pub trait TextEncoder: Send + Sync {
    async fn encode_text(&self, text: &str) -> Result<EmbeddingVector, CollaboratorError>;
}
