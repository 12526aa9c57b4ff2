use std::cmp::Ordering;

use sentinel_types::{RiskDecision, RiskVerdict, SentinelError, SentinelResult};
use serde::{Deserialize, Serialize};

use crate::dictionary::{ThreatDictionary, ThreatEntry};
use crate::normalizer::NormalizedText;

/// Matcher configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// A matched phrase blocks the frame when its weight is at or above this
    /// value. With the default of 1.0 and default weights, any match blocks.
    #[serde(default = "default_block_threshold")]
    pub block_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            block_threshold: default_block_threshold(),
        }
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> SentinelResult<()> {
        let t = self.block_threshold;
        if t.is_finite() && t > 0.0 && t <= 1.0 {
            Ok(())
        } else {
            Err(SentinelError::config(format!(
                "block threshold {} is outside (0, 1]",
                t
            )))
        }
    }
}

fn default_block_threshold() -> f64 {
    1.0
}

/// Scores normalized text against a [`ThreatDictionary`].
#[derive(Clone, Debug, Default)]
pub struct ThreatMatcher {
    config: MatcherConfig,
}

impl ThreatMatcher {
    pub fn new(config: MatcherConfig) -> SentinelResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Substring-match every dictionary phrase against `text`.
    ///
    /// The highest-weight match decides the score; ties go to the longest
    /// phrase, then to the lexically smallest one.
    pub fn match_text(
        &self,
        text: &NormalizedText,
        dictionary: &ThreatDictionary,
    ) -> RiskVerdict {
        self.match_readings(std::slice::from_ref(text), dictionary)
    }

    /// Match several readings of the same frame text as one.
    ///
    /// A phrase found in any reading counts once; scoring is as in
    /// [`match_text`](Self::match_text).
    pub fn match_readings(
        &self,
        readings: &[NormalizedText],
        dictionary: &ThreatDictionary,
    ) -> RiskVerdict {
        if readings.iter().all(NormalizedText::is_empty) {
            return RiskVerdict::clean();
        }

        let found = dictionary.find_in(readings.iter().map(NormalizedText::as_str));
        let Some(best) = found.iter().copied().max_by(|a, b| rank(a, b)) else {
            return RiskVerdict::clean();
        };

        let decision = if best.weight >= self.config.block_threshold {
            RiskDecision::Block
        } else {
            RiskDecision::Pass
        };

        RiskVerdict {
            score: best.weight,
            matched_phrase: Some(best.phrase.clone()),
            matches: found.iter().map(|e| e.phrase.clone()).collect(),
            decision,
        }
    }
}

fn rank(a: &ThreatEntry, b: &ThreatEntry) -> Ordering {
    a.weight
        .total_cmp(&b.weight)
        .then_with(|| a.phrase.len().cmp(&b.phrase.len()))
        .then_with(|| b.phrase.cmp(&a.phrase))
}

/// Match with the default configuration.
pub fn match_text(text: &NormalizedText, dictionary: &ThreatDictionary) -> RiskVerdict {
    ThreatMatcher::default().match_text(text, dictionary)
}
