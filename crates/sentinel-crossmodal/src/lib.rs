//! # sentinel-crossmodal
//!
//! Engine E: cross-modal consistency between what a frame shows and what
//! its audio says.
//!
//! An image encoder and a text encoder (CLIP-like, sharing one embedding
//! space) turn the frame and the speech transcript into
//! [`EmbeddingVector`](sentinel_types::EmbeddingVector)s. Low cosine
//! similarity between the two is a deepfake signal.
//!
//! - [`SimilarityScorer`]: cosine similarity in double precision, classified
//!   against a configurable threshold (default 0.18). Mismatched dimensions
//!   and zero/non-finite vectors are rejected, never coerced.
//! - [`CrossModalEngine`]: the configured entry point.

pub mod engine;
pub mod similarity;

pub use engine::{scan_cross_modal, CrossModalEngine};
pub use similarity::{
    cosine_similarity, SimilarityConfig, SimilarityScorer, DEFAULT_SIMILARITY_THRESHOLD,
};
