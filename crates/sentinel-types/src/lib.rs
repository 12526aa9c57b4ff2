//! # sentinel-types
//!
//! Shared data model for the Sentinel media-screening pipeline.
//!
//! Two independent verdicts are produced per frame:
//!
//! - **RiskVerdict**: textual prompt-injection found in OCR output
//!   (`Block` / `Pass`), scored in `[0, 1]`.
//! - **SimilarityVerdict**: cross-modal consistency between a frame
//!   embedding and a transcript embedding (`Match` / `Mismatch`), scored in
//!   `[-1, 1]`.
//!
//! Inputs come from external collaborators: [`TextToken`]s from an OCR engine
//! and [`EmbeddingVector`]s from image/text encoders sharing one embedding
//! space. Nothing in this crate performs I/O.

pub mod embedding;
pub mod error;
pub mod token;
pub mod verdict;

pub use embedding::EmbeddingVector;
pub use error::{SentinelError, SentinelResult};
pub use token::{BoundingBox, TextToken};
pub use verdict::{RiskDecision, RiskVerdict, SimilarityDecision, SimilarityVerdict};
