//! In-memory collaborators for tests and local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sentinel_types::{EmbeddingVector, TextToken};

use crate::collaborators::{CollaboratorError, Frame, ImageEncoder, OcrProvider, TextEncoder};

/// Returns fixed tokens for every frame, or fails every call.
#[derive(Debug, Default)]
pub struct MockOcrProvider {
    tokens: Vec<TextToken>,
    failure: Option<String>,
}

impl MockOcrProvider {
    pub fn with_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TextToken>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            tokens: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl OcrProvider for MockOcrProvider {
    async fn recognize(&self, _frame: &Frame) -> Result<Vec<TextToken>, CollaboratorError> {
        match &self.failure {
            Some(message) => Err(CollaboratorError::Ocr(message.clone())),
            None => Ok(self.tokens.clone()),
        }
    }
}

/// Returns one embedding for every frame and counts calls.
#[derive(Debug)]
pub struct MockImageEncoder {
    embedding: EmbeddingVector,
    calls: AtomicUsize,
}

impl MockImageEncoder {
    pub fn new(embedding: impl Into<EmbeddingVector>) -> Self {
        Self {
            embedding: embedding.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageEncoder for MockImageEncoder {
    async fn encode_image(&self, _frame: &Frame) -> Result<EmbeddingVector, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.embedding.clone())
    }
}

/// Looks transcripts up in a table, falling back to a default embedding.
#[derive(Debug)]
pub struct MockTextEncoder {
    table: HashMap<String, EmbeddingVector>,
    fallback: EmbeddingVector,
    calls: AtomicUsize,
}

impl MockTextEncoder {
    pub fn new(fallback: impl Into<EmbeddingVector>) -> Self {
        Self {
            table: HashMap::new(),
            fallback: fallback.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_entry(
        mut self,
        text: impl Into<String>,
        embedding: impl Into<EmbeddingVector>,
    ) -> Self {
        self.table.insert(text.into(), embedding.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextEncoder for MockTextEncoder {
    async fn encode_text(&self, text: &str) -> Result<EmbeddingVector, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .table
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}
