use serde::{Deserialize, Serialize};

/// Outcome of the prompt-injection check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDecision {
    /// Frame carries a threat phrase at or above the block threshold
    Block,
    /// Frame may proceed
    Pass,
}

/// Outcome of the cross-modal consistency check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityDecision {
    /// Audio and visual content agree
    Match,
    /// Similarity fell below the threshold (deepfake signal)
    Mismatch,
}

/// Per-frame risk verdict.
///
/// `matched_phrase` is the phrase that decided the score; `matches` lists
/// every dictionary phrase found, sorted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub score: f64,
    pub matched_phrase: Option<String>,
    #[serde(default)]
    pub matches: Vec<String>,
    pub decision: RiskDecision,
}

impl RiskVerdict {
    /// Verdict for text with no dictionary hit.
    pub fn clean() -> Self {
        Self {
            score: 0.0,
            matched_phrase: None,
            matches: Vec::new(),
            decision: RiskDecision::Pass,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.decision == RiskDecision::Block
    }

    /// Human-readable explanation suitable for logs and API responses.
    pub fn reason(&self) -> String {
        if self.matches.is_empty() {
            return "No threat phrases detected.".to_string();
        }
        let verb = match self.decision {
            RiskDecision::Block => "Matched threat phrases",
            RiskDecision::Pass => "Matched low-severity phrases",
        };
        format!("{}: {}.", verb, self.matches.join(", "))
    }
}

/// Per-frame cross-modal verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityVerdict {
    pub score: f64,
    pub decision: SimilarityDecision,
}

impl SimilarityVerdict {
    /// Classify `score` against `threshold`: anything strictly below is a
    /// mismatch, the threshold itself matches.
    pub fn classify(score: f64, threshold: f64) -> Self {
        let decision = if score < threshold {
            SimilarityDecision::Mismatch
        } else {
            SimilarityDecision::Match
        };
        Self { score, decision }
    }

    pub fn is_mismatch(&self) -> bool {
        self.decision == SimilarityDecision::Mismatch
    }
}
