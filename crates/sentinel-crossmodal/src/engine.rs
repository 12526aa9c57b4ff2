use sentinel_types::{EmbeddingVector, SentinelResult, SimilarityVerdict};
use tracing::{debug, warn};

use crate::similarity::SimilarityScorer;

/// Engine E: frame embedding + transcript embedding → similarity verdict.
///
/// Embeddings come from the image and text encoder collaborators; this
/// engine never calls an encoder.
#[derive(Clone, Debug, Default)]
pub struct CrossModalEngine {
    scorer: SimilarityScorer,
}

impl CrossModalEngine {
    pub fn new(scorer: SimilarityScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SimilarityScorer {
        &self.scorer
    }

    pub fn scan_cross_modal(
        &self,
        frame_embedding: &EmbeddingVector,
        transcript_embedding: &EmbeddingVector,
    ) -> SentinelResult<SimilarityVerdict> {
        let verdict = self
            .scorer
            .score(frame_embedding, transcript_embedding)
            .inspect_err(|e| warn!(error = %e, "cross-modal scoring rejected input"))?;

        debug!(
            dimension = frame_embedding.dimension(),
            score = verdict.score,
            threshold = self.scorer.threshold(),
            "cross-modal consistency scored"
        );
        if verdict.is_mismatch() {
            warn!(
                score = verdict.score,
                threshold = self.scorer.threshold(),
                "audio/visual mismatch"
            );
        }
        Ok(verdict)
    }
}

/// Score with the default threshold.
pub fn scan_cross_modal(
    frame_embedding: &EmbeddingVector,
    transcript_embedding: &EmbeddingVector,
) -> SentinelResult<SimilarityVerdict> {
    SimilarityScorer::default().score(frame_embedding, transcript_embedding)
}
