use sentinel_types::{EmbeddingVector, SentinelError, SentinelResult, SimilarityVerdict};
use serde::{Deserialize, Serialize};

/// Default decision threshold, calibrated for CLIP ViT-B/32.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.18;

/// Scorer configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Scores strictly below the threshold are a mismatch. Calibration depends
    /// on the embedding model, so deployments override this.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl SimilarityConfig {
    pub fn validate(&self) -> SentinelResult<()> {
        let t = self.threshold;
        if t.is_finite() && (-1.0..=1.0).contains(&t) {
            Ok(())
        } else {
            Err(SentinelError::config(format!(
                "similarity threshold {} is outside [-1, 1]",
                t
            )))
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

/// Cosine-similarity scorer with a configurable decision threshold.
#[derive(Clone, Debug, Default)]
pub struct SimilarityScorer {
    config: SimilarityConfig,
}

impl SimilarityScorer {
    pub fn new(config: SimilarityConfig) -> SentinelResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Score two embeddings and classify the result.
    ///
    /// Both vectors must have the same dimension and a finite, non-zero
    /// norm. Nothing is padded or truncated.
    pub fn score(
        &self,
        a: &EmbeddingVector,
        b: &EmbeddingVector,
    ) -> SentinelResult<SimilarityVerdict> {
        let similarity = cosine_similarity(a.as_slice(), b.as_slice())?;
        Ok(SimilarityVerdict::classify(similarity, self.config.threshold))
    }
}

/// Cosine similarity accumulated in `f64` and clamped to [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> SentinelResult<f64> {
    if a.len() != b.len() {
        return Err(SentinelError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    check_norm("left", norm_a)?;
    check_norm("right", norm_b)?;

    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

fn check_norm(side: &str, squared: f64) -> SentinelResult<()> {
    if !squared.is_finite() {
        return Err(SentinelError::DegenerateVector(format!(
            "{} vector has non-finite components",
            side
        )));
    }
    if squared == 0.0 {
        return Err(SentinelError::DegenerateVector(format!(
            "{} vector has zero norm",
            side
        )));
    }
    Ok(())
}
